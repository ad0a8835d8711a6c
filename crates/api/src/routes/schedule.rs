use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedule",
            get(handlers::schedule::get_schedule).post(handlers::schedule::create_slot),
        )
        .route(
            "/api/schedule/:id",
            put(handlers::schedule::update_slot).delete(handlers::schedule::delete_slot),
        )
        .route(
            "/api/schedule/:id/booking",
            post(handlers::schedule::request_booking).delete(handlers::schedule::cancel_booking),
        )
        .route(
            "/api/schedule/:id/bookings/:student_id",
            put(handlers::schedule::set_booking_status),
        )
}
