//! Seat accounting and booking status transitions for lesson slots.
//!
//! Evaluators never mutate. Mutations take the whole schedule so the caller
//! can persist it in one write; a mutation that returns `Err` leaves the
//! schedule exactly as it found it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    errors::{StudioError, StudioResult},
    models::{
        schedule::{Booking, BookingStatus, LessonSlot, NewSlot},
        user::User,
    },
};

/// Stands in for another student's id in a student's view of the schedule.
pub const ANONYMOUS_STUDENT: Uuid = Uuid::nil();

pub const APPROVED_MESSAGE: &str = "Your lesson booking has been approved!";
pub const DECLINED_MESSAGE: &str = "Your lesson booking was declined.";
pub const REQUESTED_MESSAGE: &str = "Booking requested! Waiting for approval.";

/// Result of a booking request. Only `Requested` changes the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Requested,
    AlreadyBooked,
    SlotFull,
}

pub fn occupied_count(slot: &LessonSlot) -> usize {
    slot.bookings
        .iter()
        .filter(|b| b.status.occupies_seat())
        .count()
}

pub fn is_full(slot: &LessonSlot) -> bool {
    occupied_count(slot) >= slot.max_students as usize
}

pub fn can_book(slot: &LessonSlot, student_id: Uuid) -> bool {
    slot.booking_for(student_id).is_none() && !is_full(slot)
}

/// Copy of `slot` where every other student's booking is anonymized.
///
/// Count, order and statuses are preserved, so occupancy reads the same.
pub fn sanitize_for_student(slot: &LessonSlot, student_id: Uuid) -> LessonSlot {
    let bookings = slot
        .bookings
        .iter()
        .map(|b| {
            if b.student_id == student_id {
                b.clone()
            } else {
                Booking {
                    student_id: ANONYMOUS_STUDENT,
                    ..b.clone()
                }
            }
        })
        .collect();

    LessonSlot {
        bookings,
        ..slot.clone()
    }
}

/// The schedule as `viewer` may see it.
pub fn sanitize_schedule(slots: &[LessonSlot], viewer: &User) -> Vec<LessonSlot> {
    if viewer.is_teacher() {
        return slots.to_vec();
    }
    slots
        .iter()
        .map(|slot| sanitize_for_student(slot, viewer.id))
        .collect()
}

fn find_slot_mut(slots: &mut [LessonSlot], slot_id: Uuid) -> StudioResult<&mut LessonSlot> {
    slots
        .iter_mut()
        .find(|s| s.id == slot_id)
        .ok_or_else(|| StudioError::NotFound(format!("Lesson slot {} not found", slot_id)))
}

pub fn request_booking(
    slots: &mut [LessonSlot],
    slot_id: Uuid,
    student_id: Uuid,
    now: DateTime<Utc>,
) -> StudioResult<BookingOutcome> {
    let slot = find_slot_mut(slots, slot_id)?;

    if slot.booking_for(student_id).is_some() {
        return Ok(BookingOutcome::AlreadyBooked);
    }
    if is_full(slot) {
        return Ok(BookingOutcome::SlotFull);
    }

    slot.bookings.push(Booking {
        student_id,
        status: BookingStatus::Pending,
        timestamp: now,
    });
    Ok(BookingOutcome::Requested)
}

/// Removes the student's booking whatever its status. Returns whether one existed.
pub fn cancel_booking(
    slots: &mut [LessonSlot],
    slot_id: Uuid,
    student_id: Uuid,
) -> StudioResult<bool> {
    let slot = find_slot_mut(slots, slot_id)?;
    let before = slot.bookings.len();
    slot.bookings.retain(|b| b.student_id != student_id);
    Ok(slot.bookings.len() != before)
}

pub fn set_booking_status(
    slots: &mut [LessonSlot],
    slot_id: Uuid,
    student_id: Uuid,
    status: BookingStatus,
) -> StudioResult<()> {
    let slot = find_slot_mut(slots, slot_id)?;
    let booking = slot
        .bookings
        .iter_mut()
        .find(|b| b.student_id == student_id)
        .ok_or_else(|| {
            StudioError::NotFound(format!(
                "No booking for student {} on slot {}",
                student_id, slot_id
            ))
        })?;
    booking.status = status;
    Ok(())
}

/// Message sent to the student after the teacher decides on a booking.
pub fn status_notification(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Approved => APPROVED_MESSAGE,
        BookingStatus::Pending | BookingStatus::Rejected => DECLINED_MESSAGE,
    }
}

pub fn add_slot(slots: &mut Vec<LessonSlot>, new_slot: NewSlot, id: Uuid) -> StudioResult<LessonSlot> {
    new_slot.validate()?;
    let slot = new_slot.into_slot(id, Vec::new());
    slots.push(slot.clone());
    Ok(slot)
}

/// Replaces the slot's fields; its id and bookings stay.
pub fn update_slot(
    slots: &mut [LessonSlot],
    slot_id: Uuid,
    new_slot: NewSlot,
) -> StudioResult<LessonSlot> {
    new_slot.validate()?;
    let slot = find_slot_mut(slots, slot_id)?;
    let bookings = std::mem::take(&mut slot.bookings);
    *slot = new_slot.into_slot(slot_id, bookings);
    Ok(slot.clone())
}

pub fn delete_slot(slots: &mut Vec<LessonSlot>, slot_id: Uuid) -> StudioResult<()> {
    let before = slots.len();
    slots.retain(|s| s.id != slot_id);
    if slots.len() == before {
        return Err(StudioError::NotFound(format!(
            "Lesson slot {} not found",
            slot_id
        )));
    }
    Ok(())
}
