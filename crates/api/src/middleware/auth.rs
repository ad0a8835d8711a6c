//! # Authentication Module
//!
//! Request extractors that turn a bearer token into the acting user, plus
//! the temporary password issued by the forgot-password flow.
//!
//! Every extraction re-reads the user from the store, so a teacher blocking
//! or deleting a student ends that student's sessions on their next request.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use rand::{distributions::Alphanumeric, Rng};
use studio_core::{
    access::{session_still_valid, SESSION_TERMINATED},
    errors::StudioError,
    models::user::User,
};
use studio_db::repositories::users;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

const TEMPORARY_PASSWORD_LEN: usize = 10;

/// The user behind a valid session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: Uuid,
    pub user: User,
}

/// A session belonging to the teacher.
#[derive(Debug, Clone)]
pub struct TeacherUser(pub User);

/// A session belonging to a student.
#[derive(Debug, Clone)]
pub struct StudentUser(pub User);

fn unauthenticated(message: &str) -> AppError {
    AppError(StudioError::Authentication(message.to_string()))
}

/// Reads `Authorization: Bearer <token>`.
pub fn bearer_token(parts: &Parts) -> Result<Uuid, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthenticated("Please log in."))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthenticated("Expected a bearer token."))?;

    Uuid::parse_str(token.trim()).map_err(|_| unauthenticated("Malformed session token."))
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = state
            .sessions
            .resolve(token)
            .await
            .ok_or_else(|| unauthenticated("Your session has expired. Please log in again."))?;

        match users::get_user_by_id(&state.store, user_id).await? {
            Some(user) if session_still_valid(&user) => Ok(CurrentUser { token, user }),
            _ => {
                tracing::info!(user_id = %user_id, "Terminating session of blocked or removed user");
                state.end_user_sessions(user_id).await;
                Err(unauthenticated(SESSION_TERMINATED))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for TeacherUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_teacher() {
            return Err(AppError(StudioError::Authorization(
                "Only the teacher can do that.".to_string(),
            )));
        }
        Ok(TeacherUser(user))
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for StudentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser { user, .. } = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_student() {
            return Err(AppError(StudioError::Authorization(
                "Only students can do that.".to_string(),
            )));
        }
        Ok(StudentUser(user))
    }
}

/// Random alphanumeric password for the forgot-password flow.
pub fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
