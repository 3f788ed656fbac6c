use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EnvironmentConfig, MAX_JWT_EXPIRATION};
use crate::models::{SessionUser, UserRole};
use crate::utils::errors::AppError;

/// Claims del token de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // user_id
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Token emitido junto con su caducidad
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub max_age_seconds: i64,
}

/// Servicio JWT
pub struct JwtService {
    algorithm: Algorithm,
    session_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, session_seconds: u64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            session_duration: Duration::seconds(session_seconds.min(MAX_JWT_EXPIRATION) as i64),
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration)
    }

    /// Genera un token de sesión firmado
    pub fn issue(&self, user: &SessionUser) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let exp = now + self.session_duration;

        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating session token: {}", e)))?;

        Ok(IssuedToken {
            token,
            max_age_seconds: self.session_duration.num_seconds(),
        })
    }

    /// Valida y decodifica un token
    pub fn verify(&self, token: &str) -> Result<SessionUser, AppError> {
        let validation = Validation::new(self.algorithm);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))?;

        Ok(SessionUser {
            id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "admin@agency.test".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let jwt_service = JwtService::new("test-secret", 7 * 24 * 3600);
        let user = user();

        let issued = jwt_service.issue(&user).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(issued.max_age_seconds, 604800);

        let session = jwt_service.verify(&issued.token).unwrap();
        assert_eq!(session, user);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issued = JwtService::new("secret-a", 3600).issue(&user()).unwrap();
        let result = JwtService::new("secret-b", 3600).verify(&issued.token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt_service = JwtService::new("test-secret", 3600);
        assert!(jwt_service.verify("not.a.token").is_err());
        assert!(jwt_service.verify("").is_err());
    }
}
