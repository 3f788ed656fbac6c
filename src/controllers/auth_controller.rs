//! Controlador de autenticación
//!
//! Login contra la tabla de usuarios y alta del administrador inicial.
//! Un email desconocido y una contraseña incorrecta producen exactamente
//! el mismo error.

use std::sync::Arc;

use crate::config::BootstrapAdmin;
use crate::dto::auth_dto::LoginRequest;
use crate::models::{NewUser, SessionUser, User, UserRole};
use crate::repositories::Repositories;
use crate::services::jwt_service::IssuedToken;
use crate::services::password_service::{hash_password, verify_password};
use crate::services::JwtService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::required;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthController {
    repos: Repositories,
    jwt: Arc<JwtService>,
}

impl AuthController {
    pub fn new(repos: Repositories, jwt: Arc<JwtService>) -> Self {
        Self { repos, jwt }
    }

    /// Valida credenciales y emite el token de sesión
    pub async fn login(&self, request: LoginRequest) -> AppResult<(SessionUser, IssuedToken)> {
        let email = required(&request.email, "email")?;
        let password = required(&request.password, "password")?;

        let user = match self.repos.users.find_by_email(email).await? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                tracing::warn!("❌ Login fallido para {}", email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let session_user = SessionUser::from(&user);
        let token = self.jwt.issue(&session_user)?;
        tracing::info!("✅ Login correcto: {} ({})", user.email, user.role);
        Ok((session_user, token))
    }
}

/// Crea el administrador inicial si todavía no existe
pub async fn ensure_bootstrap_admin(repos: &Repositories, admin: &BootstrapAdmin) -> AppResult<Option<User>> {
    if repos.users.find_by_email(&admin.email).await?.is_some() {
        tracing::info!("👤 Administrador {} ya existe", admin.email);
        return Ok(None);
    }

    let user = repos
        .users
        .create(NewUser {
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: UserRole::Admin,
            password_hash: hash_password(&admin.password)?,
        })
        .await?;

    tracing::info!("✅ Administrador inicial creado: {}", user.email);
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use crate::services::password_service::hash_password_with_cost;

    async fn setup() -> AuthController {
        let repos = Repositories::in_memory(Arc::new(InMemoryStore::new()));
        repos
            .users
            .create(NewUser {
                email: "manager@agency.test".to_string(),
                name: "Marta".to_string(),
                role: UserRole::Manager,
                password_hash: hash_password_with_cost("correct-horse", 4).unwrap(),
            })
            .await
            .unwrap();
        AuthController::new(repos, Arc::new(JwtService::new("test-secret", 3600)))
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let controller = setup().await;
        let (user, token) = controller
            .login(login("manager@agency.test", "correct-horse"))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Manager);
        assert_eq!(token.max_age_seconds, 3600);
        assert_eq!(controller.jwt.verify(&token.token).unwrap(), user);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let controller = setup().await;
        let wrong_password = controller
            .login(login("manager@agency.test", "nope"))
            .await
            .unwrap_err();
        let unknown_email = controller
            .login(login("ghost@agency.test", "nope"))
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let repos = Repositories::in_memory(Arc::new(InMemoryStore::new()));
        let admin = BootstrapAdmin {
            email: "admin@agency.test".to_string(),
            password: "changeme".to_string(),
            name: "Admin".to_string(),
        };
        assert!(ensure_bootstrap_admin(&repos, &admin).await.unwrap().is_some());
        assert!(ensure_bootstrap_admin(&repos, &admin).await.unwrap().is_none());
    }
}
