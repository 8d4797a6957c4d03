//! HTTP routes for demo class endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    book_demo_class, cancel_booking, complete_booking, get_slots, reschedule_booking,
    DemoHandlers,
};

/// Creates the demo class router.
pub fn demo_routes(handlers: DemoHandlers) -> Router {
    Router::new()
        .route("/slots", get(get_slots))
        .route("/bookings", post(book_demo_class))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/bookings/:id/reschedule", put(reschedule_booking))
        .route("/bookings/:id/complete", post(complete_booking))
        .with_state(handlers)
}
