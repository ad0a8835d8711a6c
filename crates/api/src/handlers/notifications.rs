use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use studio_core::{errors::StudioError, models::notification::Notification};
use uuid::Uuid;

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.notifications.list(current.user.id).await))
}

#[axum::debug_handler]
pub async fn dismiss_notification(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.notifications.dismiss(current.user.id, id).await {
        return Err(StudioError::NotFound(format!("Notification {} not found", id)).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
