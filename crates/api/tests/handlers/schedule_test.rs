use axum::http::StatusCode;
use chrono::{Utc, Weekday};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studio_core::{
    booking::{ANONYMOUS_STUDENT, APPROVED_MESSAGE, DECLINED_MESSAGE, REQUESTED_MESSAGE},
    models::{
        notification::Notification,
        schedule::{Booking, BookingStatus, LessonSlot},
    },
};
use studio_db::{repositories::schedule, seed::STUDENT_ID};
use uuid::Uuid;

use crate::test_utils::TestContext;
use crate::test_utils::authed;

async fn slot_on(ctx: &TestContext, day: Weekday) -> LessonSlot {
    schedule::get_schedule(ctx.store())
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.day == day)
        .expect("seeded slot")
}

async fn inbox(ctx: &TestContext, token: Uuid) -> Vec<Notification> {
    authed(ctx.server.get("/api/notifications"), token)
        .await
        .json::<Vec<Notification>>()
}

async fn create_slot(ctx: &TestContext, teacher: Uuid, max_students: u32) -> LessonSlot {
    let response = authed(ctx.server.post("/api/schedule"), teacher)
        .json(&json!({
            "day": "Fri",
            "time": "10:30",
            "duration_min": 45,
            "max_students": max_students,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<LessonSlot>()
}

#[tokio::test]
async fn test_student_view_hides_other_students() {
    let ctx = TestContext::new().await;
    let monday = slot_on(&ctx, Weekday::Mon).await;
    let other = Uuid::new_v4();
    schedule::update_schedule(ctx.store(), |slots| {
        let slot = slots.iter_mut().find(|s| s.id == monday.id).unwrap();
        slot.bookings.push(Booking {
            student_id: other,
            status: BookingStatus::Pending,
            timestamp: Utc::now(),
        });
        Ok(())
    })
    .await
    .unwrap();

    let student = ctx.login_student().await;
    let seen = authed(ctx.server.get("/api/schedule"), student)
        .await
        .json::<Vec<LessonSlot>>();
    let seen_monday = seen.iter().find(|s| s.id == monday.id).unwrap();
    let ids: Vec<Uuid> = seen_monday.bookings.iter().map(|b| b.student_id).collect();
    assert_eq!(ids, vec![STUDENT_ID, ANONYMOUS_STUDENT]);
    assert_eq!(seen_monday.bookings[1].status, BookingStatus::Pending);

    let teacher = ctx.login_teacher().await;
    let full = authed(ctx.server.get("/api/schedule"), teacher)
        .await
        .json::<Vec<LessonSlot>>();
    let full_monday = full.iter().find(|s| s.id == monday.id).unwrap();
    assert_eq!(full_monday.bookings[1].student_id, other);
}

#[tokio::test]
async fn test_request_booking_is_pending_and_notifies() {
    let ctx = TestContext::new().await;
    let wednesday = slot_on(&ctx, Weekday::Wed).await;
    let student = ctx.login_student().await;

    let response = authed(
        ctx.server.post(&format!("/api/schedule/{}/booking", wednesday.id)),
        student,
    )
    .await;
    response.assert_status_ok();
    let slot = response.json::<LessonSlot>();
    assert_eq!(slot.bookings.len(), 1);
    assert_eq!(slot.bookings[0].student_id, STUDENT_ID);
    assert_eq!(slot.bookings[0].status, BookingStatus::Pending);

    let stored = slot_on(&ctx, Weekday::Wed).await;
    assert_eq!(stored.booking_for(STUDENT_ID).unwrap().status, BookingStatus::Pending);

    let messages: Vec<String> = inbox(&ctx, student).await.into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec![REQUESTED_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_repeat_booking_conflicts_and_changes_nothing() {
    let ctx = TestContext::new().await;
    let monday = slot_on(&ctx, Weekday::Mon).await;
    let student = ctx.login_student().await;

    let response = authed(
        ctx.server.post(&format!("/api/schedule/{}/booking", monday.id)),
        student,
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        response.json::<Value>()["message"],
        "You have already booked this class."
    );
    assert_eq!(slot_on(&ctx, Weekday::Mon).await, monday);
    assert!(inbox(&ctx, student).await.is_empty());
}

#[tokio::test]
async fn test_full_slot_rejects_and_rejected_frees_seat() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;
    let slot = create_slot(&ctx, teacher, 1).await;
    let (first, first_token) = ctx.signed_in_student("Shira Paz").await;
    let second = ctx.login_student().await;

    authed(ctx.server.post(&format!("/api/schedule/{}/booking", slot.id)), first_token)
        .await
        .assert_status_ok();

    let full = authed(ctx.server.post(&format!("/api/schedule/{}/booking", slot.id)), second).await;
    assert_eq!(full.status_code(), StatusCode::CONFLICT);
    assert_eq!(full.json::<Value>()["message"], "This class is full.");

    authed(
        ctx.server.put(&format!("/api/schedule/{}/bookings/{}", slot.id, first.id)),
        teacher,
    )
    .json(&json!({ "status": "REJECTED" }))
    .await
    .assert_status_ok();

    authed(ctx.server.post(&format!("/api/schedule/{}/booking", slot.id)), second)
        .await
        .assert_status_ok();

    let stored = schedule::get_schedule(ctx.store())
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.id == slot.id)
        .unwrap();
    assert_eq!(stored.bookings.len(), 2);
    assert_eq!(stored.booking_for(first.id).unwrap().status, BookingStatus::Rejected);
    assert_eq!(stored.booking_for(STUDENT_ID).unwrap().status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_cancel_booking_removes_it() {
    let ctx = TestContext::new().await;
    let monday = slot_on(&ctx, Weekday::Mon).await;
    let student = ctx.login_student().await;

    let response = authed(
        ctx.server.delete(&format!("/api/schedule/{}/booking", monday.id)),
        student,
    )
    .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(slot_on(&ctx, Weekday::Mon).await.booking_for(STUDENT_ID).is_none());

    let again = authed(
        ctx.server.delete(&format!("/api/schedule/{}/booking", monday.id)),
        student,
    )
    .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_approval_notifies_only_that_student() {
    let ctx = TestContext::new().await;
    let wednesday = slot_on(&ctx, Weekday::Wed).await;
    let (other, other_token) = ctx.signed_in_student("Gal Shani").await;
    let student = ctx.login_student().await;
    let teacher = ctx.login_teacher().await;

    for token in [student, other_token] {
        authed(ctx.server.post(&format!("/api/schedule/{}/booking", wednesday.id)), token)
            .await
            .assert_status_ok();
    }

    let response = authed(
        ctx.server.put(&format!("/api/schedule/{}/bookings/{}", wednesday.id, STUDENT_ID)),
        teacher,
    )
    .json(&json!({ "status": "APPROVED" }))
    .await;
    response.assert_status_ok();

    let stored = slot_on(&ctx, Weekday::Wed).await;
    assert_eq!(stored.booking_for(STUDENT_ID).unwrap().status, BookingStatus::Approved);
    assert_eq!(stored.booking_for(other.id).unwrap().status, BookingStatus::Pending);

    let approvals = inbox(&ctx, student)
        .await
        .into_iter()
        .filter(|n| n.message == APPROVED_MESSAGE)
        .count();
    assert_eq!(approvals, 1);
    assert!(inbox(&ctx, other_token)
        .await
        .iter()
        .all(|n| n.message != APPROVED_MESSAGE));

    authed(
        ctx.server.put(&format!("/api/schedule/{}/bookings/{}", wednesday.id, other.id)),
        teacher,
    )
    .json(&json!({ "status": "REJECTED" }))
    .await
    .assert_status_ok();
    assert_eq!(inbox(&ctx, other_token).await[0].message, DECLINED_MESSAGE);
}

#[tokio::test]
async fn test_status_for_missing_booking_is_not_found() {
    let ctx = TestContext::new().await;
    let wednesday = slot_on(&ctx, Weekday::Wed).await;
    let student = ctx.login_student().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(
        ctx.server.put(&format!("/api/schedule/{}/bookings/{}", wednesday.id, STUDENT_ID)),
        teacher,
    )
    .json(&json!({ "status": "APPROVED" }))
    .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(inbox(&ctx, student).await.is_empty());
    assert_eq!(slot_on(&ctx, Weekday::Wed).await, wednesday);
}

#[tokio::test]
async fn test_roles_are_enforced_on_bookings() {
    let ctx = TestContext::new().await;
    let monday = slot_on(&ctx, Weekday::Mon).await;
    let student = ctx.login_student().await;
    let teacher = ctx.login_teacher().await;

    let by_student = authed(
        ctx.server.put(&format!("/api/schedule/{}/bookings/{}", monday.id, STUDENT_ID)),
        student,
    )
    .json(&json!({ "status": "REJECTED" }))
    .await;
    assert_eq!(by_student.status_code(), StatusCode::FORBIDDEN);

    let by_teacher = authed(
        ctx.server.post(&format!("/api/schedule/{}/booking", monday.id)),
        teacher,
    )
    .await;
    assert_eq!(by_teacher.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(slot_on(&ctx, Weekday::Mon).await, monday);
}

#[tokio::test]
async fn test_slot_crud_keeps_bookings() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;
    let monday = slot_on(&ctx, Weekday::Mon).await;

    let created = create_slot(&ctx, teacher, 8).await;
    assert_eq!(created.day, Weekday::Fri);
    assert_eq!(created.time.format("%H:%M").to_string(), "10:30");
    assert!(created.bookings.is_empty());

    let updated = authed(ctx.server.put(&format!("/api/schedule/{}", monday.id)), teacher)
        .json(&json!({
            "day": "Tue",
            "time": "19:00",
            "duration_min": 90,
            "max_students": 12,
        }))
        .await
        .json::<LessonSlot>();
    assert_eq!(updated.id, monday.id);
    assert_eq!(updated.day, Weekday::Tue);
    assert_eq!(updated.max_students, 12);
    assert_eq!(updated.bookings, monday.bookings);

    let deleted = authed(ctx.server.delete(&format!("/api/schedule/{}", created.id)), teacher).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    let remaining = schedule::get_schedule(ctx.store()).await.unwrap();
    assert!(remaining.iter().all(|s| s.id != created.id));

    let missing = authed(ctx.server.delete(&format!("/api/schedule/{}", created.id)), teacher).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_slot_is_rejected() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(ctx.server.post("/api/schedule"), teacher)
        .json(&json!({
            "day": "Sun",
            "time": "07:00",
            "duration_min": 60,
            "max_students": 0,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
