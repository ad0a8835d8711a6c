use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use studio_core::{
    access::{self, INVALID_CREDENTIALS, REGISTERED_MESSAGE},
    errors::StudioError,
    models::{
        settings::HintResponse,
        user::{
            ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
            User, UserResponse, UserRole, UserStatus,
        },
    },
};
use studio_db::{
    password,
    repositories::{settings, users},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{self, CurrentUser},
        error_handling::AppError,
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError(StudioError::Authentication(INVALID_CREDENTIALS.to_string()));

    let user = users::get_user_by_email(&state.store, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(invalid());
    }

    access::login_gate(&user)?;

    // The demo credentials hint goes away once the teacher has signed in
    if user.is_teacher() {
        settings::set_hide_credentials_hint(&state.store, true).await?;
    }

    let token = state.sessions.open(user.id).await;
    state.notifications.activate(&user).await;
    info!(user_id = %user.id, role = ?user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.end_session(current.token).await;
    info!(user_id = %current.user.id, "User logged out");
    Ok(Json(MessageResponse::new("Logged out.")))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    payload.validate()?;

    let password_hash = password::hash_password(&payload.password)?;
    let avatar = format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(payload.name.trim())
    );

    let user = User {
        id: Uuid::new_v4(),
        email: payload.email.trim().to_string(),
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        role: UserRole::Student,
        status: UserStatus::Pending,
        password_hash,
        avatar: Some(avatar),
    };
    let user_id = user.id;

    users::update_users(&state.store, move |all| {
        if let Some(existing) = access::find_by_email(all, &user.email) {
            return Err(access::registration_conflict(existing));
        }
        all.push(user);
        Ok(())
    })
    .await?;

    info!(user_id = %user_id, "New student registered, awaiting approval");
    Ok((StatusCode::CREATED, Json(MessageResponse::new(REGISTERED_MESSAGE))))
}

/// Replaces the password with a temporary one. Nothing is mailed: the
/// temporary password only reaches the `password_reset` log target.
#[axum::debug_handler]
pub async fn forgot_password(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = payload.email.trim().to_string();
    let temporary = auth::generate_temporary_password();
    let password_hash = password::hash_password(&temporary)?;

    users::update_users(&state.store, |all| {
        let user = all
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| StudioError::NotFound("Email not found.".to_string()))?;
        user.password_hash = password_hash;
        Ok(())
    })
    .await?;

    info!(
        target: "password_reset",
        email = %email,
        temporary_password = %temporary,
        "Password reset issued"
    );

    Ok(Json(MessageResponse::new(format!(
        "A password reset link has been sent to {}.",
        email
    ))))
}

#[axum::debug_handler]
pub async fn credentials_hint(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<HintResponse>, AppError> {
    let hidden = settings::get_hide_credentials_hint(&state.store).await?;
    Ok(Json(HintResponse { show_hint: !hidden }))
}
