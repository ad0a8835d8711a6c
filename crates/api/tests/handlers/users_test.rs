use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use studio_core::models::user::{UserResponse, UserStatus};
use studio_db::seed::{STUDENT_ID, TEACHER_ID};

use crate::test_utils::{authed, TestContext, TEACHER_PASSWORD};

#[tokio::test]
async fn test_user_list_is_role_scoped() {
    let ctx = TestContext::new().await;
    let other = ctx.add_student("Maya Katz", UserStatus::Pending).await;
    let teacher = ctx.login_teacher().await;
    let student = ctx.login_student().await;

    let all = authed(ctx.server.get("/api/users"), teacher)
        .await
        .json::<Vec<UserResponse>>();
    assert_eq!(all.len(), 3);

    let scoped = authed(ctx.server.get("/api/users"), student)
        .await
        .json::<Vec<UserResponse>>();
    let mut ids: Vec<_> = scoped.iter().map(|u| u.id).collect();
    ids.sort();
    let mut expected = vec![TEACHER_ID, STUDENT_ID];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(scoped.iter().all(|u| u.id != other.id));
}

#[tokio::test]
async fn test_teacher_approves_pending_student() {
    let ctx = TestContext::new().await;
    let pending = ctx.add_student("Roni Azulay", UserStatus::Pending).await;
    let teacher = ctx.login_teacher().await;

    let response = authed(
        ctx.server.put(&format!("/api/users/{}/status", pending.id)),
        teacher,
    )
    .json(&json!({ "status": "APPROVED" }))
    .await;
    response.assert_status_ok();
    assert_eq!(response.json::<UserResponse>().status, UserStatus::Approved);

    // The student can now sign in
    ctx.login(&pending.email, "secret").await;
}

#[tokio::test]
async fn test_student_cannot_change_status() {
    let ctx = TestContext::new().await;
    let pending = ctx.add_student("Lior Ben", UserStatus::Pending).await;
    let student = ctx.login_student().await;

    let response = authed(
        ctx.server.put(&format!("/api/users/{}/status", pending.id)),
        student,
    )
    .json(&json!({ "status": "APPROVED" }))
    .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_teacher_status_cannot_change() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(
        ctx.server.put(&format!("/api/users/{}/status", TEACHER_ID)),
        teacher,
    )
    .json(&json!({ "status": "BLOCKED" }))
    .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_teacher_resets_student_password() {
    let ctx = TestContext::new().await;
    let student = ctx.add_student("Tamar Golan", UserStatus::Approved).await;
    let teacher = ctx.login_teacher().await;

    authed(
        ctx.server.put(&format!("/api/users/{}/password", student.id)),
        teacher,
    )
    .json(&json!({ "password": "fresh-start" }))
    .await
    .assert_status_ok();

    ctx.login(&student.email, "fresh-start").await;
}

#[tokio::test]
async fn test_teacher_updates_own_credentials() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(ctx.server.put("/api/account/credentials"), teacher)
        .json(&json!({ "email": "studio@yoga.com", "password": "lotus" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<UserResponse>().email, "studio@yoga.com");

    ctx.login("studio@yoga.com", "lotus").await;
    let old = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": "studio@yoga.com", "password": TEACHER_PASSWORD }))
        .await;
    assert_eq!(old.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_credentials_email_must_stay_unique() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(ctx.server.put("/api/account/credentials"), teacher)
        .json(&json!({ "email": crate::test_utils::STUDENT_EMAIL, "password": "lotus" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}
