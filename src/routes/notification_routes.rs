use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::NotificationController;
use crate::dto::notification_dto::{MarkReadResponse, NotificationListQuery, NotificationListResponse};
use crate::middleware::require_session;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{path_param, query_params};

pub fn create_notification_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/read-all", post(mark_all_read))
        .route("/notifications/:id/read", patch(mark_read))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn list_notifications(
    State(state): State<AppState>,
    query: Result<Query<NotificationListQuery>, QueryRejection>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let query = query_params(query)?;
    let response = NotificationController::new(state.repos.clone()).list(query).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MarkReadResponse>, AppError> {
    let id = path_param(id)?;
    let response = NotificationController::new(state.repos.clone()).mark_read(id).await?;
    Ok(Json(response))
}

async fn mark_all_read(State(state): State<AppState>) -> Result<Json<MarkReadResponse>, AppError> {
    let response = NotificationController::new(state.repos.clone()).mark_all_read().await?;
    Ok(Json(response))
}
