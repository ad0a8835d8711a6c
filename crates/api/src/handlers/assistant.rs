use axum::{extract::State, Json};
use std::sync::Arc;
use studio_core::{
    errors::StudioError,
    models::assistant::{ChatRequest, ChatResponse},
};

use crate::{
    middleware::{auth::CurrentUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn chat(
    State(state): State<Arc<ApiState>>,
    _current: CurrentUser,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(StudioError::Validation("Message is required".to_string()).into());
    }
    let reply = state.assistant.chat(&payload.history, message).await;
    Ok(Json(ChatResponse { reply }))
}
