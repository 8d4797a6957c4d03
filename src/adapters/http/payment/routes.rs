//! HTTP routes for one-shot payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_payment_status, process_payment, PaymentHandlers};

/// Creates the payment router.
pub fn payment_routes(handlers: PaymentHandlers) -> Router {
    Router::new()
        .route("/process", post(process_payment))
        .route("/:id/status", get(get_payment_status))
        .with_state(handlers)
}
