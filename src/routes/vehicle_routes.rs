use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListQuery};
use crate::dto::ApiResponse;
use crate::middleware::{admin_only, require_session};
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{json_body, path_param, query_params};

/// Catálogo público de lectura; altas, cambios y bajas solo para admin
pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id", get(get_vehicle));

    let admin = Router::new()
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
        .route_layer(middleware::from_fn(admin_only))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(admin)
}

async fn create_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let request = json_body(payload)?;
    let response = VehicleController::new(state.repos.clone()).create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let id = path_param(id)?;
    let vehicle = VehicleController::new(state.repos.clone()).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<VehicleListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let query = query_params(query)?;
    let vehicles = VehicleController::new(state.repos.clone()).list(query).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    let response = VehicleController::new(state.repos.clone()).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_param(id)?;
    VehicleController::new(state.repos.clone()).delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted successfully")))
}
