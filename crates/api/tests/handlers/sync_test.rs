use pretty_assertions::assert_eq;
use studio_core::models::settings::Theme;
use studio_db::{repositories::settings, CollectionKey};

use crate::test_utils::{authed, TestContext};

#[test_log::test(tokio::test)]
async fn test_resync_reports_nothing_when_in_step() {
    let ctx = TestContext::new().await;
    let student = ctx.login_student().await;

    let changed = authed(ctx.server.post("/api/sync/resync"), student)
        .await
        .json::<Vec<String>>();
    assert!(changed.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_writes_reach_change_listeners() {
    let ctx = TestContext::new().await;
    let mut changes = ctx.store().changes();

    settings::set_theme(ctx.store(), Theme::EarthSky).await.unwrap();

    let change = changes.recv().await.unwrap();
    assert_eq!(change.key, CollectionKey::Theme);
}

#[test_log::test(tokio::test)]
async fn test_change_stream_requires_session() {
    let ctx = TestContext::new().await;
    let response = ctx.server.get("/api/sync/events").await;
    assert_eq!(response.status_code(), axum::http::StatusCode::UNAUTHORIZED);
}
