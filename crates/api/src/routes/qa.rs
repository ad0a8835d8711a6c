use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/qa",
            get(handlers::qa::list_questions).post(handlers::qa::ask_question),
        )
        .route("/api/qa/:id", delete(handlers::qa::delete_question))
        .route("/api/qa/:id/answer", put(handlers::qa::answer_question))
        .route(
            "/api/qa/:id/visibility",
            put(handlers::qa::set_question_visibility),
        )
}
