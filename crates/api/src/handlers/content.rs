use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use studio_core::{
    errors::StudioError,
    models::content::{ContentItem, DescribeRequest, DescribeResponse, NewContent},
};
use studio_db::repositories::{content, settings};
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{CurrentUser, TeacherUser},
        error_handling::AppError,
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn list_content(
    State(state): State<Arc<ApiState>>,
    _current: CurrentUser,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    Ok(Json(content::get_content(&state.store).await?))
}

/// Publishes a post and tells every signed-in student about it.
#[axum::debug_handler]
pub async fn add_content(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Json(payload): Json<NewContent>,
) -> Result<(StatusCode, Json<ContentItem>), AppError> {
    let limits = settings::get_settings(&state.store).await?;
    payload.validate(limits.max_upload_size_mb)?;

    let item = payload.into_item(Uuid::new_v4(), Utc::now());
    let stored = item.clone();
    content::update_content(&state.store, move |items| {
        items.insert(0, stored);
        Ok(())
    })
    .await?;

    let reached = state
        .notifications
        .notify_students(&format!("New content added: {}", item.title))
        .await;
    info!(content_id = %item.id, notified = reached, "Content published");

    Ok((StatusCode::CREATED, Json(item)))
}

#[axum::debug_handler]
pub async fn delete_content(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    content::update_content(&state.store, |items| {
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(StudioError::NotFound(format!("Content {} not found", id)));
        }
        Ok(())
    })
    .await?;

    info!(content_id = %id, "Content deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn describe_content(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Json(payload): Json<DescribeRequest>,
) -> Result<Json<DescribeResponse>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(StudioError::Validation("Title is required".to_string()).into());
    }
    let description = state
        .assistant
        .generate_description(payload.title.trim(), payload.content_type)
        .await;
    Ok(Json(DescribeResponse { description }))
}
