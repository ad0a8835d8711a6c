use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use studio_core::{
    access,
    errors::StudioError,
    models::user::{
        MessageResponse, ResetPasswordRequest, UpdateCredentialsRequest, UpdateUserStatusRequest,
        UserResponse, UserStatus,
    },
};
use studio_db::{password, repositories::users};
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
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let all = users::get_users(&state.store).await?;
    let visible = access::sanitize_users(&current.user, &all)
        .iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(visible))
}

/// Approve, block or re-open a student account. Blocking ends the
/// student's sessions right away.
#[axum::debug_handler]
pub async fn set_user_status(
    State(state): State<Arc<ApiState>>,
    TeacherUser(teacher): TeacherUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let updated = users::update_users(&state.store, |all| {
        let user = all
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StudioError::NotFound(format!("User {} not found", user_id)))?;
        if user.is_teacher() {
            return Err(StudioError::Validation(
                "The teacher account has no approval status.".to_string(),
            ));
        }
        user.status = payload.status;
        Ok(UserResponse::from(&*user))
    })
    .await?;

    if payload.status == UserStatus::Blocked {
        state.end_user_sessions(user_id).await;
    }

    info!(
        teacher_id = %teacher.id,
        user_id = %user_id,
        status = ?payload.status,
        "Student status changed"
    );
    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn reset_user_password(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if payload.password.is_empty() {
        return Err(StudioError::Validation("Password is required".to_string()).into());
    }
    let password_hash = password::hash_password(&payload.password)?;

    let name = users::update_users(&state.store, |all| {
        let user = all
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StudioError::NotFound(format!("User {} not found", user_id)))?;
        user.password_hash = password_hash;
        Ok(user.name.clone())
    })
    .await?;

    info!(user_id = %user_id, "Password reset by teacher");
    Ok(Json(MessageResponse::new(format!("Password for {} updated.", name))))
}

/// The teacher's own login email and password.
#[axum::debug_handler]
pub async fn update_credentials(
    State(state): State<Arc<ApiState>>,
    TeacherUser(teacher): TeacherUser,
    Json(payload): Json<UpdateCredentialsRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let email = payload.email.trim().to_string();
    if email.is_empty() {
        return Err(StudioError::Validation("Email is required".to_string()).into());
    }
    if payload.password.is_empty() {
        return Err(StudioError::Validation("Password is required".to_string()).into());
    }
    let password_hash = password::hash_password(&payload.password)?;

    let updated = users::update_users(&state.store, |all| {
        if all.iter().any(|u| u.email == email && u.id != teacher.id) {
            return Err(StudioError::Conflict("Email already exists.".to_string()));
        }
        let me = all
            .iter_mut()
            .find(|u| u.id == teacher.id)
            .ok_or_else(|| StudioError::NotFound("Account not found".to_string()))?;
        me.email = email;
        me.password_hash = password_hash;
        Ok(UserResponse::from(&*me))
    })
    .await?;

    info!(user_id = %teacher.id, "Teacher credentials updated");
    Ok(Json(updated))
}
