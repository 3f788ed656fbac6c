use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::RentalController;
use crate::dto::rental_dto::{
    BulkDeleteRequest, BulkDeleteResponse, RentalListQuery, RentalListResponse, RentalResponse,
    UpdatePaymentStatusRequest, UpdateRentalStatusRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::require_session;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{json_body, path_param, query_params};

/// Rutas del panel de administración; todas requieren sesión
pub fn create_rental_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/rentals", get(list_rentals))
        .route("/rentals/bulk-delete", post(bulk_delete))
        .route("/rentals/:id", get(get_rental).delete(delete_rental))
        .route("/rentals/:id/status", patch(update_status))
        .route("/rentals/:id/payment-status", patch(update_payment_status))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn list_rentals(
    State(state): State<AppState>,
    query: Result<Query<RentalListQuery>, QueryRejection>,
) -> Result<Json<RentalListResponse>, AppError> {
    let query = query_params(query)?;
    let rentals = RentalController::new(state.repos.clone()).list(query).await?;
    Ok(Json(RentalListResponse {
        success: true,
        rentals,
    }))
}

async fn get_rental(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RentalResponse>, AppError> {
    let id = path_param(id)?;
    let rental = RentalController::new(state.repos.clone()).get(id).await?;
    Ok(Json(RentalResponse { success: true, rental }))
}

async fn delete_rental(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_param(id)?;
    RentalController::new(state.repos.clone()).delete(id).await?;
    Ok(Json(ApiResponse::message("Rental deleted successfully")))
}

async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateRentalStatusRequest>, JsonRejection>,
) -> Result<Json<RentalResponse>, AppError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    let rental = RentalController::new(state.repos.clone())
        .update_status(id, request)
        .await?;

    state.notifier.rental_status_changed(&rental.rental);
    Ok(Json(RentalResponse { success: true, rental }))
}

async fn update_payment_status(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Result<Json<RentalResponse>, AppError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    let rental = RentalController::new(state.repos.clone())
        .update_payment_status(id, request)
        .await?;

    state.notifier.payment_status_changed(&rental.rental);
    Ok(Json(RentalResponse { success: true, rental }))
}

async fn bulk_delete(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, AppError> {
    let request = json_body(payload)?;
    let deleted_count = RentalController::new(state.repos.clone())
        .bulk_delete(request)
        .await?;
    Ok(Json(BulkDeleteResponse {
        success: true,
        deleted_count,
    }))
}
