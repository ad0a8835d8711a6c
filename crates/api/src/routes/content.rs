use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/content",
            get(handlers::content::list_content).post(handlers::content::add_content),
        )
        .route(
            "/api/content/describe",
            post(handlers::content::describe_content),
        )
        .route("/api/content/:id", delete(handlers::content::delete_content))
}
