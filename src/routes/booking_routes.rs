use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::BookingController;
use crate::dto::booking_dto::{AvailabilityQuery, AvailabilityResponse, CreateBookingRequest, CreateBookingResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{json_body, path_param, query_params};

/// Rutas públicas del formulario de reservas
pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/vehicles/:id/availability", get(check_availability))
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let request = json_body(payload)?;
    let controller = BookingController::new(state.repos.clone(), state.config.enforce_availability);
    let outcome = controller.create_booking(request).await?;

    if outcome.customer_created {
        state
            .notifier
            .customer_created(&outcome.customer.name, &outcome.customer.email);
    }
    state.notifier.booking_created(&outcome.rental, &outcome.customer.name);

    Ok(Json(CreateBookingResponse {
        success: true,
        rental_id: outcome.rental.rental_code.clone(),
        rental: outcome.rental,
    }))
}

async fn check_availability(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let vehicle_id = path_param(id)?;
    let query = query_params(query)?;
    let controller = BookingController::new(state.repos.clone(), state.config.enforce_availability);
    let response = controller.check_availability(vehicle_id, query).await?;
    Ok(Json(response))
}
