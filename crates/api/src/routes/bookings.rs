use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::create_booking))
        .route(
            "/api/bookings/:id/cancellation",
            get(handlers::booking::cancellation_eligibility),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_booking),
        )
}
