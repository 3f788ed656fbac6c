//! Backend de administración de alquiler de vehículos
//!
//! API REST (axum + sqlx) para reservas, disponibilidad, ciclo de vida de
//! los rentals, clientes, flota, notificaciones y sesión de staff.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::sync::Arc;

use config::EnvironmentConfig;
use database::DatabaseConnection;
use repositories::{InMemoryStore, Repositories};

pub use routes::create_router;
pub use state::AppState;

/// Elige el almacenamiento: PostgreSQL si hay `DATABASE_URL`, memoria si no
pub async fn build_repositories(config: &EnvironmentConfig) -> Result<Repositories, sqlx::Error> {
    match DatabaseConnection::shared(config).await? {
        Some(pool) => Ok(Repositories::postgres(pool.clone())),
        None => {
            tracing::warn!("⚠️ DATABASE_URL no configurada, usando almacenamiento en memoria");
            Ok(Repositories::in_memory(Arc::new(InMemoryStore::new())))
        }
    }
}
