use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/sync/events", get(handlers::sync::change_events))
        .route("/api/sync/resync", post(handlers::sync::resync))
}
