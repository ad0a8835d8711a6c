use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use studio_core::models::settings::{AppSettings, Font, Theme, ThemeResponse};
use studio_db::repositories::settings;

use crate::test_utils::{authed, TestContext};

#[tokio::test]
async fn test_settings_are_public() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api/settings").await;
    response.assert_status_ok();
    assert_eq!(response.json::<AppSettings>(), AppSettings::default());

    let theme = ctx.server.get("/api/settings/theme").await.json::<ThemeResponse>();
    assert_eq!(theme.theme, Theme::PinkBlue);
    assert_eq!(theme.name, "Pink & Blue");
}

#[tokio::test]
async fn test_teacher_updates_settings() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(ctx.server.put("/api/settings"), teacher)
        .json(&json!({
            "max_upload_size_mb": 25,
            "logo_url": "https://example.com/logo.png",
            "main_image_url": null,
            "font": "ROUNDED",
        }))
        .await;
    response.assert_status_ok();

    let stored = settings::get_settings(ctx.store()).await.unwrap();
    assert_eq!(stored.max_upload_size_mb, 25);
    assert_eq!(stored.font, Font::Rounded);
    assert_eq!(stored.logo_url.as_deref(), Some("https://example.com/logo.png"));
    assert_eq!(stored.main_image_url, None);
}

#[tokio::test]
async fn test_zero_upload_limit_is_rejected() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;

    let response = authed(ctx.server.put("/api/settings"), teacher)
        .json(&json!({ "max_upload_size_mb": 0, "logo_url": null, "main_image_url": null }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(settings::get_settings(ctx.store()).await.unwrap(), AppSettings::default());
}

#[tokio::test]
async fn test_theme_changes_by_teacher_only() {
    let ctx = TestContext::new().await;
    let teacher = ctx.login_teacher().await;
    let student = ctx.login_student().await;

    let denied = authed(ctx.server.put("/api/settings/theme"), student)
        .json(&json!({ "theme": "FIRE_ICE" }))
        .await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let changed = authed(ctx.server.put("/api/settings/theme"), teacher)
        .json(&json!({ "theme": "SAGE_SAND" }))
        .await
        .json::<ThemeResponse>();
    assert_eq!(changed.theme, Theme::SageSand);
    assert_eq!(settings::get_theme(ctx.store()).await.unwrap(), Theme::SageSand);

    let unknown = authed(ctx.server.put("/api/settings/theme"), teacher)
        .json(&json!({ "theme": "NEON" }))
        .await;
    assert!(unknown.status_code().is_client_error());
    assert_eq!(settings::get_theme(ctx.store()).await.unwrap(), Theme::SageSand);
}
