use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{StudioError, StudioResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Pending and approved bookings hold a seat; rejected ones never do.
    pub fn occupies_seat(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }
}

/// A student's claim on a slot. A slot holds at most one booking per student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub student_id: Uuid,
    pub status: BookingStatus,
    pub timestamp: DateTime<Utc>,
}

/// A weekly class with a fixed capacity and its bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSlot {
    pub id: Uuid,
    pub day: Weekday,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub duration_min: u32,
    pub max_students: u32,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl LessonSlot {
    pub fn booking_for(&self, student_id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.student_id == student_id)
    }
}

/// Teacher-supplied fields for creating or replacing a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSlot {
    pub day: Weekday,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub duration_min: u32,
    pub max_students: u32,
}

impl NewSlot {
    pub fn validate(&self) -> StudioResult<()> {
        if self.duration_min == 0 {
            return Err(StudioError::Validation(
                "Duration must be at least one minute".to_string(),
            ));
        }
        if self.max_students == 0 {
            return Err(StudioError::Validation(
                "Max students must be at least one".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_slot(self, id: Uuid, bookings: Vec<Booking>) -> LessonSlot {
        LessonSlot {
            id,
            day: self.day,
            time: self.time,
            duration_min: self.duration_min,
            max_students: self.max_students,
            bookings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBookingStatusRequest {
    pub status: BookingStatus,
}

/// Lesson times travel as `HH:MM`.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(D::Error::custom)
    }
}
