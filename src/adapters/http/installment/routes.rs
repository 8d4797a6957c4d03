//! HTTP routes for installment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_installment_order, create_installment_plan, get_pending_installments,
    process_first_installment, process_second_installment, InstallmentHandlers,
};

/// Creates the installment router.
pub fn installment_routes(handlers: InstallmentHandlers) -> Router {
    Router::new()
        .route("/plan", post(create_installment_plan))
        .route("/order", post(create_installment_order))
        .route("/first", post(process_first_installment))
        .route("/second", post(process_second_installment))
        .route("/pending", get(get_pending_installments))
        .with_state(handlers)
}
