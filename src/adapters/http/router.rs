//! Top-level API router assembly.

use axum::{middleware, routing::get, Router};

use super::auth::{auth_routes, AuthHandlers};
use super::demo::{demo_routes, DemoHandlers};
use super::installment::{installment_routes, InstallmentHandlers};
use super::middleware::{session_middleware, SessionState};
use super::payment::{payment_routes, PaymentHandlers};
use super::plan::{plan_routes, PlanHandlers};
use super::subscription::{subscription_routes, SubscriptionHandlers};
use super::user::{user_routes, UserHandlers};

/// Everything the API router needs, one state struct per module.
pub struct ApiHandlers {
    pub auth: AuthHandlers,
    pub user: UserHandlers,
    pub plan: PlanHandlers,
    pub payment: PaymentHandlers,
    pub installment: InstallmentHandlers,
    pub subscription: SubscriptionHandlers,
    pub demo: DemoHandlers,
}

/// Builds the `/api` router with the session middleware applied to every
/// route. Public endpoints simply never read the injected context.
pub fn api_router(handlers: ApiHandlers, sessions: SessionState) -> Router {
    Router::new()
        .nest("/api/auth", auth_routes(handlers.auth))
        .nest("/api/user", user_routes(handlers.user))
        .nest("/api/plans", plan_routes(handlers.plan))
        .nest("/api/payments", payment_routes(handlers.payment))
        .nest("/api/installments", installment_routes(handlers.installment))
        .nest("/api/subscriptions", subscription_routes(handlers.subscription))
        .nest("/api/demo", demo_routes(handlers.demo))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(sessions, session_middleware))
}

async fn health() -> &'static str {
    "ok"
}
