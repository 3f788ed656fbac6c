//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto razonable para desarrollo, salvo las
//! restricciones que impone `ENVIRONMENT=production`.

use std::collections::HashMap;
use std::env;

use thiserror::Error;

/// Secreto por defecto, solo aceptado fuera de producción
pub const DEFAULT_JWT_SECRET: &str = "dev-only-session-secret-change-me";

/// Siete días en segundos
pub const DEFAULT_JWT_EXPIRATION: u64 = 7 * 24 * 60 * 60;

/// Un año en segundos; tope de la duración de sesión
pub const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("JWT_SECRET must be set in production")]
    MissingJwtSecret,
}

/// Credenciales del administrador inicial
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub session_cookie_name: String,
    pub cookie_secure: bool,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub enforce_availability: bool,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Cargar la configuración desde un mapa de variables
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_production = environment == "production";

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::MissingJwtSecret),
            None => {
                tracing::warn!("⚠️ JWT_SECRET no configurado, usando secreto de desarrollo");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let jwt_expiration = parse_or(
            "JWT_EXPIRATION",
            get("JWT_EXPIRATION"),
            DEFAULT_JWT_EXPIRATION,
            "number of seconds",
        )?;
        if !(1..=MAX_JWT_EXPIRATION).contains(&jwt_expiration) {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRATION",
                expected: "number of seconds between 1 and 31536000",
                value: jwt_expiration.to_string(),
            });
        }

        let bootstrap_admin = match (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                email,
                password,
                name: get("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 3000, "port number")?,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                10,
                "number",
            )?,
            jwt_secret,
            jwt_expiration,
            session_cookie_name: get("SESSION_COOKIE_NAME")
                .unwrap_or_else(|| "session_token".to_string()),
            cookie_secure: parse_bool("COOKIE_SECURE", get("COOKIE_SECURE"), is_production)?
                || is_production,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_requests: parse_or(
                "RATE_LIMIT_REQUESTS",
                get("RATE_LIMIT_REQUESTS"),
                10,
                "number",
            )?,
            rate_limit_window: parse_or(
                "RATE_LIMIT_WINDOW",
                get("RATE_LIMIT_WINDOW"),
                60,
                "number of seconds",
            )?,
            enforce_availability: parse_bool(
                "ENFORCE_AVAILABILITY",
                get("ENFORCE_AVAILABILITY"),
                false,
            )?,
            bootstrap_admin,
            environment,
        })
    }

    /// Configuración de desarrollo sin base de datos, útil para tests
    pub fn development() -> Self {
        Self {
            environment: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: None,
            database_max_connections: 5,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration: DEFAULT_JWT_EXPIRATION,
            session_cookie_name: "session_token".to_string(),
            cookie_secure: false,
            cors_origins: Vec::new(),
            rate_limit_requests: 10,
            rate_limit_window: 60,
            enforce_availability: false,
            bootstrap_admin: None,
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value: raw,
        }),
    }
}

fn parse_bool(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let normalized = value.as_ref().map(|v| v.to_ascii_lowercase());
    match normalized.as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::InvalidValue {
            name,
            expected: "boolean",
            value: value.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_vars(&HashMap::new()).unwrap();
        assert!(config.is_development());
        assert_eq!(config.port, 3000);
        assert_eq!(config.jwt_expiration, DEFAULT_JWT_EXPIRATION);
        assert!(config.database_url.is_none());
        assert!(!config.cookie_secure);
        assert!(!config.enforce_availability);
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn test_production_requires_secret_and_secure_cookie() {
        let err = EnvironmentConfig::from_vars(&vars(&[("ENVIRONMENT", "production")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingJwtSecret);

        let config = EnvironmentConfig::from_vars(&vars(&[
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s3cret"),
            ("COOKIE_SECURE", "false"),
        ]))
        .unwrap();
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = EnvironmentConfig::from_vars(&vars(&[("PORT", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));

        let err = EnvironmentConfig::from_vars(&vars(&[("ENFORCE_AVAILABILITY", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "ENFORCE_AVAILABILITY", .. }));
    }

    #[test]
    fn test_jwt_expiration_is_bounded() {
        for raw in ["0", "31536001", "18446744073709551615"] {
            let err = EnvironmentConfig::from_vars(&vars(&[("JWT_EXPIRATION", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { name: "JWT_EXPIRATION", .. }), "{}", raw);
        }

        let config = EnvironmentConfig::from_vars(&vars(&[("JWT_EXPIRATION", "31536000")])).unwrap();
        assert_eq!(config.jwt_expiration, MAX_JWT_EXPIRATION);
    }

    #[test]
    fn test_lists_and_bootstrap_admin() {
        let config = EnvironmentConfig::from_vars(&vars(&[
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("ADMIN_EMAIL", "admin@agency.test"),
            ("ADMIN_PASSWORD", "changeme"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.email, "admin@agency.test");
        assert_eq!(admin.name, "Administrator");
    }
}
