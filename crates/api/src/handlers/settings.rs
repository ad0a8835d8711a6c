use axum::{extract::State, Json};
use std::sync::Arc;
use studio_core::{
    errors::StudioError,
    models::settings::{AppSettings, ThemeRequest, ThemeResponse},
};
use studio_db::repositories::settings;
use tracing::info;

use crate::{
    middleware::{auth::TeacherUser, error_handling::AppError},
    ApiState,
};

/// Public: the login screen needs the logo, hero image and font.
#[axum::debug_handler]
pub async fn get_settings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<AppSettings>, AppError> {
    Ok(Json(settings::get_settings(&state.store).await?))
}

#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Json(payload): Json<AppSettings>,
) -> Result<Json<AppSettings>, AppError> {
    if payload.max_upload_size_mb == 0 {
        return Err(StudioError::Validation(
            "Upload size limit must be at least 1MB".to_string(),
        )
        .into());
    }
    settings::set_settings(&state.store, &payload).await?;

    info!(max_upload_size_mb = payload.max_upload_size_mb, font = ?payload.font, "Settings updated");
    Ok(Json(payload))
}

#[axum::debug_handler]
pub async fn get_theme(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ThemeResponse>, AppError> {
    let theme = settings::get_theme(&state.store).await?;
    Ok(Json(ThemeResponse::from(theme)))
}

#[axum::debug_handler]
pub async fn set_theme(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<ThemeResponse>, AppError> {
    settings::set_theme(&state.store, payload.theme).await?;

    info!(theme = ?payload.theme, "Theme changed");
    Ok(Json(ThemeResponse::from(payload.theme)))
}
