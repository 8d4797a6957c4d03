//! HTTP routes for the plan catalog.

use axum::{routing::get, Router};

use super::handlers::{list_plans, PlanHandlers};

/// Creates the plan router.
pub fn plan_routes(handlers: PlanHandlers) -> Router {
    Router::new()
        .route("/", get(list_plans))
        .with_state(handlers)
}
