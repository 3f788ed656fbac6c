//! Rutas HTTP
//!
//! Cada módulo expone un `Router<AppState>` con sus rutas; aquí se
//! combinan y se aplican las capas comunes.

pub mod auth_routes;
pub mod booking_routes;
pub mod customer_routes;
pub mod notification_routes;
pub mod rental_routes;
pub mod vehicle_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .merge(booking_routes::create_booking_router())
        .merge(vehicle_routes::create_vehicle_router(state.clone()))
        .merge(rental_routes::create_rental_router(state.clone()))
        .merge(customer_routes::create_customer_router(state.clone()))
        .merge(notification_routes::create_notification_router(state.clone()))
        .merge(auth_routes::create_auth_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "storage": state.repos.backend,
    }))
}
