//! Middleware de sesión
//!
//! El token de sesión se lee de la cookie http-only o, en su defecto, del
//! header `Authorization: Bearer`. Un token ausente o inválido equivale a
//! no tener sesión.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use crate::{
    config::EnvironmentConfig,
    models::{SessionUser, UserRole},
    services::JwtService,
    state::AppState,
    utils::errors::AppError,
};

/// Extrae el token de sesión: cookie primero, luego Bearer
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
        })
}

/// Resuelve la sesión de una request; `None` si no hay sesión válida
pub fn resolve_session(headers: &HeaderMap, jwt: &JwtService, cookie_name: &str) -> Option<SessionUser> {
    let token = session_token(headers, cookie_name)?;
    match jwt.verify(&token) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("Sesión descartada: {}", e);
            None
        }
    }
}

/// Cookie de sesión http-only, same-site lax, para todo el sitio
pub fn session_cookie(config: &EnvironmentConfig, token: impl Into<String>, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((config.session_cookie_name.clone(), token.into()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(max_age_seconds))
        .secure(config.cookie_secure)
        .build()
}

/// Cookie vacía que expira inmediatamente
pub fn cleared_session_cookie(config: &EnvironmentConfig) -> Cookie<'static> {
    session_cookie(config, String::new(), 0)
}

/// Middleware que exige una sesión válida e inyecta `SessionUser`
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_session(request.headers(), &state.jwt, &state.config.session_cookie_name)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Middleware para verificar permisos de admin; va después de `require_session`
pub async fn admin_only(
    Extension(user): Extension<SessionUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
