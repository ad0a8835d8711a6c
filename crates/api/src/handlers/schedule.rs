use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use studio_core::{
    booking::{self, BookingOutcome, REQUESTED_MESSAGE},
    errors::StudioError,
    models::schedule::{LessonSlot, NewSlot, SetBookingStatusRequest},
};
use studio_db::repositories::schedule;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{CurrentUser, StudentUser, TeacherUser},
        error_handling::AppError,
    },
    ApiState,
};

/// Teachers get the full roster; students only see their own bookings by id.
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    current: CurrentUser,
) -> Result<Json<Vec<LessonSlot>>, AppError> {
    let slots = schedule::get_schedule(&state.store).await?;
    Ok(Json(booking::sanitize_schedule(&slots, &current.user)))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Json(payload): Json<NewSlot>,
) -> Result<(StatusCode, Json<LessonSlot>), AppError> {
    let slot = schedule::update_schedule(&state.store, |slots| {
        booking::add_slot(slots, payload, Uuid::new_v4())
    })
    .await?;

    info!(slot_id = %slot.id, day = ?slot.day, "Lesson slot added");
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(slot_id): Path<Uuid>,
    Json(payload): Json<NewSlot>,
) -> Result<Json<LessonSlot>, AppError> {
    let slot = schedule::update_schedule(&state.store, |slots| {
        booking::update_slot(slots, slot_id, payload)
    })
    .await?;

    info!(slot_id = %slot_id, "Lesson slot updated");
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path(slot_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    schedule::update_schedule(&state.store, |slots| booking::delete_slot(slots, slot_id)).await?;

    info!(slot_id = %slot_id, "Lesson slot deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Asks for a seat. A repeat request or a full class leaves the schedule
/// untouched and answers 409.
#[axum::debug_handler]
pub async fn request_booking(
    State(state): State<Arc<ApiState>>,
    StudentUser(student): StudentUser,
    Path(slot_id): Path<Uuid>,
) -> Result<Json<LessonSlot>, AppError> {
    let slot = schedule::update_schedule(&state.store, |slots| {
        match booking::request_booking(slots, slot_id, student.id, Utc::now())? {
            BookingOutcome::Requested => {}
            BookingOutcome::AlreadyBooked => {
                return Err(StudioError::Conflict(
                    "You have already booked this class.".to_string(),
                ))
            }
            BookingOutcome::SlotFull => {
                return Err(StudioError::Conflict("This class is full.".to_string()))
            }
        }
        slots
            .iter()
            .find(|s| s.id == slot_id)
            .map(|s| booking::sanitize_for_student(s, student.id))
            .ok_or_else(|| StudioError::NotFound(format!("Lesson slot {} not found", slot_id)))
    })
    .await?;

    state.notifications.notify(student.id, REQUESTED_MESSAGE).await;
    info!(slot_id = %slot_id, student_id = %student.id, "Booking requested");
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    StudentUser(student): StudentUser,
    Path(slot_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    schedule::update_schedule(&state.store, |slots| {
        if booking::cancel_booking(slots, slot_id, student.id)? {
            Ok(())
        } else {
            Err(StudioError::NotFound(
                "You have no booking on this class.".to_string(),
            ))
        }
    })
    .await?;

    info!(slot_id = %slot_id, student_id = %student.id, "Booking cancelled");
    Ok(StatusCode::NO_CONTENT)
}

/// Approves or declines one booking and tells that student.
#[axum::debug_handler]
pub async fn set_booking_status(
    State(state): State<Arc<ApiState>>,
    TeacherUser(_): TeacherUser,
    Path((slot_id, student_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SetBookingStatusRequest>,
) -> Result<Json<LessonSlot>, AppError> {
    let slot = schedule::update_schedule(&state.store, |slots| {
        booking::set_booking_status(slots, slot_id, student_id, payload.status)?;
        slots
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or_else(|| StudioError::NotFound(format!("Lesson slot {} not found", slot_id)))
    })
    .await?;

    state
        .notifications
        .notify(student_id, booking::status_notification(payload.status))
        .await;
    info!(
        slot_id = %slot_id,
        student_id = %student_id,
        status = ?payload.status,
        "Booking status changed"
    );
    Ok(Json(slot))
}
