//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::RateLimitState;
use crate::repositories::Repositories;
use crate::services::{JwtService, NotificationService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub repos: Repositories,
    pub jwt: Arc<JwtService>,
    pub notifier: NotificationService,
    pub login_rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repos: Repositories) -> Self {
        Self {
            jwt: Arc::new(JwtService::from_config(&config)),
            notifier: NotificationService::new(repos.notifications.clone()),
            login_rate_limit: RateLimitState::from_config(&config),
            config: Arc::new(config),
            repos,
        }
    }
}
