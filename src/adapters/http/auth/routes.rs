//! HTTP routes for auth endpoints.

use axum::{routing::post, Router};

use super::handlers::{login, logout, membership_login, register, AuthHandlers};

/// Creates the auth router with all endpoints.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/membership-login", post(membership_login))
        .route("/logout", post(logout))
        .with_state(handlers)
}
