use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::CustomerController;
use crate::dto::customer_dto::{CustomerListQuery, UpdateCustomerRequest};
use crate::dto::ApiResponse;
use crate::middleware::require_session;
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{json_body, path_param, query_params};

pub fn create_customer_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route(
            "/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn list_customers(
    State(state): State<AppState>,
    query: Result<Query<CustomerListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, AppError> {
    let query = query_params(query)?;
    let customers = CustomerController::new(state.repos.clone()).list(query).await?;
    Ok(Json(ApiResponse::success(customers)))
}

async fn get_customer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let id = path_param(id)?;
    let customer = CustomerController::new(state.repos.clone()).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(customer)))
}

async fn update_customer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let id = path_param(id)?;
    let request = json_body(payload)?;
    let response = CustomerController::new(state.repos.clone()).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_customer(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = path_param(id)?;
    CustomerController::new(state.repos.clone()).delete(id).await?;
    Ok(Json(ApiResponse::message("Customer deleted successfully")))
}
