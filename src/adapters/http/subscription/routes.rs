//! HTTP routes for subscription endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_subscription, create_subscription, disable_auto_pay, enable_auto_pay,
    process_renewal, renewal_failed, upcoming_renewals, SubscriptionHandlers,
};

/// Creates the subscription router.
pub fn subscription_routes(handlers: SubscriptionHandlers) -> Router {
    Router::new()
        .route("/", post(create_subscription))
        .route("/upcoming-renewals", get(upcoming_renewals))
        .route("/:id/auto-pay/enable", post(enable_auto_pay))
        .route("/:id/auto-pay/disable", post(disable_auto_pay))
        .route("/:id/cancel", post(cancel_subscription))
        .route("/:id/renewal", post(process_renewal))
        .route("/:id/renewal-failed", post(renewal_failed))
        .with_state(handlers)
}
