use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users/:id/status", put(handlers::users::set_user_status))
        .route(
            "/api/users/:id/password",
            put(handlers::users::reset_user_password),
        )
        .route(
            "/api/account/credentials",
            put(handlers::users::update_credentials),
        )
}
