use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use studio_core::{
    models::qa::{AnswerRequest, NewQuestion, QaItem, VisibilityRequest},
    qa::{self, ANSWERED_MESSAGE},
};
use studio_db::repositories::qa as qa_repo;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{CurrentUser, StudentUser, TeacherUser},
        error_handling::AppError,
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<QaItem>>, AppError> {
    let items = qa_repo::get_qa(&state.store).await?;
    Ok(Json(qa::visible_to(&current.user, &items)))
}

#[axum::debug_handler]
pub async fn ask_question(
    State(state): State<Arc<ApiState>>,
    StudentUser(student): StudentUser,
    Json(payload): Json<NewQuestion>,
) -> Result<(StatusCode, Json<QaItem>), AppError> {
    let item = qa::ask(&student, payload, Utc::now())?;
    let stored = item.clone();
    qa_repo::update_qa(&state.store, move |items| {
        items.insert(0, stored);
        Ok(())
    })
    .await?;

    info!(question_id = %item.id, student_id = %student.id, "Question asked");
    Ok((StatusCode::CREATED, Json(item)))
}

#[axum::debug_handler]
pub async fn answer_question(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<QaItem>, AppError> {
    let item = qa_repo::update_qa(&state.store, |items| qa::answer(items, id, payload.answer))
        .await?;

    state.notifications.notify(item.student_id, ANSWERED_MESSAGE).await;
    info!(question_id = %id, "Question answered");
    Ok(Json(item))
}

#[axum::debug_handler]
pub async fn set_question_visibility(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VisibilityRequest>,
) -> Result<Json<QaItem>, AppError> {
    let item = qa_repo::update_qa(&state.store, |items| {
        qa::set_visibility(items, id, payload.is_public, payload.is_approved)
    })
    .await?;
    Ok(Json(item))
}

#[axum::debug_handler]
pub async fn delete_question(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    qa_repo::update_qa(&state.store, |items| qa::delete(items, id)).await?;

    info!(question_id = %id, "Question deleted");
    Ok(StatusCode::NO_CONTENT)
}
