use axum::http::StatusCode;
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name},
    Fake,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studio_core::{
    access::{INVALID_CREDENTIALS, REGISTERED_MESSAGE, SESSION_TERMINATED},
    models::{
        settings::HintResponse,
        user::{LoginResponse, MessageResponse, UserRole, UserStatus},
    },
};
use studio_db::repositories::{settings, users};

use crate::test_utils::{
    authed, TestContext, STUDENT_EMAIL, STUDENT_PASSWORD, TEACHER_EMAIL, TEACHER_PASSWORD,
};

fn registration(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": "namaste123",
        "phone": "+972 (52) 555-0101",
    })
}

#[tokio::test]
async fn test_teacher_login_hides_credentials_hint() {
    let ctx = TestContext::new().await;

    let hint = ctx.server.get("/api/auth/hint").await.json::<HintResponse>();
    assert!(hint.show_hint);

    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": TEACHER_EMAIL, "password": TEACHER_PASSWORD }))
        .await;
    response.assert_status_ok();
    let body = response.json::<LoginResponse>();
    assert_eq!(body.user.role, UserRole::Teacher);

    let hint = ctx.server.get("/api/auth/hint").await.json::<HintResponse>();
    assert!(!hint.show_hint);
    assert!(settings::get_hide_credentials_hint(ctx.store()).await.unwrap());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": STUDENT_EMAIL, "password": "nope" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_login_ignores_surrounding_whitespace_in_email() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": format!("  {}\t", STUDENT_EMAIL), "password": STUDENT_PASSWORD }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<LoginResponse>().user.role, UserRole::Student);
}

#[tokio::test]
async fn test_student_login_does_not_hide_hint() {
    let ctx = TestContext::new().await;
    ctx.login(STUDENT_EMAIL, STUDENT_PASSWORD).await;

    let hint = ctx.server.get("/api/auth/hint").await.json::<HintResponse>();
    assert!(hint.show_hint);
}

#[tokio::test]
async fn test_registration_creates_pending_student() {
    let ctx = TestContext::new().await;
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&registration(&name, &email))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<MessageResponse>().message, REGISTERED_MESSAGE);

    let stored = users::get_user_by_email(ctx.store(), &email)
        .await
        .unwrap()
        .expect("registered user stored");
    assert_eq!(stored.role, UserRole::Student);
    assert_eq!(stored.status, UserStatus::Pending);
    assert_ne!(stored.password_hash, "namaste123");

    // Pending accounts cannot sign in yet
    let login = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "namaste123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        login.json::<Value>()["message"],
        "Your account is pending teacher approval."
    );
}

#[tokio::test]
async fn test_duplicate_registration_conflicts_without_writing() {
    let ctx = TestContext::new().await;
    let email: String = SafeEmail().fake();

    ctx.server
        .post("/api/auth/register")
        .json(&registration("First Try", &email))
        .await
        .assert_status(StatusCode::CREATED);
    let before = users::get_users(ctx.store()).await.unwrap();

    let again = ctx
        .server
        .post("/api/auth/register")
        .json(&registration("Second Try", &email))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        again.json::<Value>()["message"],
        "Application already submitted. Please wait for approval."
    );
    assert_eq!(users::get_users(ctx.store()).await.unwrap(), before);

    let existing = ctx
        .server
        .post("/api/auth/register")
        .json(&registration("Dana Again", STUDENT_EMAIL))
        .await;
    assert_eq!(existing.status_code(), StatusCode::CONFLICT);
    assert_eq!(
        existing.json::<Value>()["message"],
        "Email already exists. Please login."
    );
}

#[tokio::test]
async fn test_registration_rejects_bad_phone() {
    let ctx = TestContext::new().await;
    let mut body = registration("Noa", "noa@example.com");
    body["phone"] = json!("call me");

    let response = ctx.server.post("/api/auth/register").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forgot_password_replaces_password() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": STUDENT_EMAIL }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<MessageResponse>().message,
        format!("A password reset link has been sent to {}.", STUDENT_EMAIL)
    );

    let old = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": STUDENT_EMAIL, "password": STUDENT_PASSWORD }))
        .await;
    assert_eq!(old.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::new().await;
    let token = ctx.login(STUDENT_EMAIL, STUDENT_PASSWORD).await;

    authed(ctx.server.get("/api/schedule"), token).await.assert_status_ok();
    authed(ctx.server.post("/api/auth/logout"), token).await.assert_status_ok();

    let after = authed(ctx.server.get("/api/schedule"), token).await;
    assert_eq!(after.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let ctx = TestContext::new().await;
    let response = ctx.server.get("/api/schedule").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blocked_student_session_terminated() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;
    let (student, token) = ctx.signed_in_student("Yael Levi").await;

    authed(
        ctx.server.put(&format!("/api/users/{}/status", student.id)),
        teacher,
    )
    .json(&json!({ "status": "BLOCKED" }))
    .await
    .assert_status_ok();

    let response = authed(ctx.server.get("/api/content"), token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(!ctx.state.sessions.is_active(student.id).await);

    let login = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": student.email, "password": "secret" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(login.json::<Value>()["message"], "Your account has been suspended.");
}

#[tokio::test]
async fn test_session_of_blocked_student_ends_on_next_request() {
    let ctx = TestContext::new().await;
    let (student, token) = ctx.signed_in_student("Omer Bar").await;

    // Blocked through the store, as another tab or process would
    users::update_users(ctx.store(), |all| {
        if let Some(user) = all.iter_mut().find(|u| u.id == student.id) {
            user.status = UserStatus::Blocked;
        }
        Ok(())
    })
    .await
    .unwrap();

    let response = authed(ctx.server.get("/api/schedule"), token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], SESSION_TERMINATED);
}
