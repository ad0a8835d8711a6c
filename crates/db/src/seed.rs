//! Collections a fresh studio starts with.

use chrono::{Duration, NaiveTime, Utc, Weekday};
use eyre::Result;
use serde_json::Value;
use studio_core::models::{
    content::{ContentItem, ContentType},
    qa::QaItem,
    schedule::{Booking, BookingStatus, LessonSlot},
    settings::{AppSettings, Theme},
    user::{User, UserRole, UserStatus},
};
use uuid::Uuid;

use crate::{keys::CollectionKey, password::hash_password};

pub const TEACHER_EMAIL: &str = "admin@yoga.com";
pub const TEACHER_PASSWORD: &str = "admin";
pub const STUDENT_EMAIL: &str = "student@test.com";
pub const STUDENT_PASSWORD: &str = "password";

/// Ids are fixed so that seeded bookings point at the seeded student.
pub const TEACHER_ID: Uuid = Uuid::from_u128(0x7ea0_0000_0000_4000_8000_0000_0000_0001);
pub const STUDENT_ID: Uuid = Uuid::from_u128(0x57d0_0000_0000_4000_8000_0000_0000_0001);

fn users() -> Result<Vec<User>> {
    Ok(vec![
        User {
            id: TEACHER_ID,
            email: TEACHER_EMAIL.to_string(),
            name: "Neta (Teacher)".to_string(),
            phone: "+972-50-0000000".to_string(),
            role: UserRole::Teacher,
            status: UserStatus::Approved,
            password_hash: hash_password(TEACHER_PASSWORD)?,
            avatar: Some("https://picsum.photos/id/64/200/200".to_string()),
        },
        User {
            id: STUDENT_ID,
            email: STUDENT_EMAIL.to_string(),
            name: "Dana Cohen".to_string(),
            phone: "+972-52-1111111".to_string(),
            role: UserRole::Student,
            status: UserStatus::Approved,
            password_hash: hash_password(STUDENT_PASSWORD)?,
            avatar: Some("https://picsum.photos/id/65/200/200".to_string()),
        },
    ])
}

fn content() -> Vec<ContentItem> {
    let now = Utc::now();
    vec![
        ContentItem {
            id: Uuid::new_v4(),
            content_type: ContentType::Image,
            title: "Morning Sun Salutation".to_string(),
            description: "Start your day with energy and grace.".to_string(),
            url: Some("https://picsum.photos/id/88/800/600".to_string()),
            timestamp: now - Duration::seconds(1000),
        },
        ContentItem {
            id: Uuid::new_v4(),
            content_type: ContentType::Text,
            title: "Mindfulness Tip #1".to_string(),
            description:
                "Breathe deeply into your belly. Let the exhale be longer than the inhale."
                    .to_string(),
            url: None,
            timestamp: now - Duration::seconds(500),
        },
    ]
}

fn schedule() -> Vec<LessonSlot> {
    let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();
    vec![
        LessonSlot {
            id: Uuid::new_v4(),
            day: Weekday::Mon,
            time: at(18),
            duration_min: 60,
            max_students: 10,
            bookings: vec![Booking {
                student_id: STUDENT_ID,
                status: BookingStatus::Approved,
                timestamp: Utc::now(),
            }],
        },
        LessonSlot {
            id: Uuid::new_v4(),
            day: Weekday::Wed,
            time: at(8),
            duration_min: 60,
            max_students: 10,
            bookings: Vec::new(),
        },
    ]
}

/// The value a collection holds before anything was ever written to it.
pub fn default_value(key: CollectionKey) -> Result<Value> {
    let value = match key {
        CollectionKey::Users => serde_json::to_value(users()?)?,
        CollectionKey::Content => serde_json::to_value(content())?,
        CollectionKey::Schedule => serde_json::to_value(schedule())?,
        CollectionKey::Qa => serde_json::to_value(Vec::<QaItem>::new())?,
        CollectionKey::Settings => serde_json::to_value(AppSettings::default())?,
        CollectionKey::Theme => serde_json::to_value(Theme::default())?,
        CollectionKey::HideCredentialsHint => Value::Bool(false),
    };
    Ok(value)
}
