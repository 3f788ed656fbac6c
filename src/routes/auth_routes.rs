use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::controllers::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};
use crate::middleware::auth::{cleared_session_cookie, resolve_session, session_cookie};
use crate::middleware::login_rate_limit;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::json_body;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let login_route = Router::new()
        .route("/auth/login", post(login))
        .route_layer(middleware::from_fn_with_state(state, login_rate_limit));

    Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .merge(login_route)
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let request = json_body(payload)?;
    let controller = AuthController::new(state.repos.clone(), state.jwt.clone());
    let (user, token) = controller.login(request).await?;
    let cookie = session_cookie(&state.config, token.token, token.max_age_seconds);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            user,
        }),
    ))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cleared_session_cookie(&state.config)),
        Json(LogoutResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
}

async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    let user = resolve_session(&headers, &state.jwt, &state.config.session_cookie_name);
    Json(SessionResponse {
        success: true,
        authenticated: user.is_some(),
        user,
    })
}
