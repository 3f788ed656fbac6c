//! Conexión a PostgreSQL
//!
//! El pool es un recurso de proceso: se crea en el primer uso, una sola
//! vez, y vive hasta que el proceso termina. Solo se construye si hay
//! `DATABASE_URL` configurada.

use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config::{DatabaseConfig, EnvironmentConfig};

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Acceso al pool compartido del proceso
pub struct DatabaseConnection;

impl DatabaseConnection {
    /// Devuelve el pool, inicializándolo y migrando en la primera llamada.
    ///
    /// `Ok(None)` si no hay credenciales de base de datos configuradas.
    pub async fn shared(config: &EnvironmentConfig) -> Result<Option<&'static PgPool>, sqlx::Error> {
        let Some(db_config) = DatabaseConfig::from_environment(config) else {
            return Ok(None);
        };

        let pool = POOL
            .get_or_try_init(|| async move {
                tracing::info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&db_config.url));
                let pool = db_config.create_pool().await?;
                run_migrations(&pool).await?;
                tracing::info!("✅ PostgreSQL conectado y migrado");
                Ok::<_, sqlx::Error>(pool)
            })
            .await?;

        Ok(Some(pool))
    }
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    match url.rfind('@') {
        Some(at_pos) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
