//! HTTP handlers for auth endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::auth::{
    LoginCommand, LoginHandler, LogoutHandler, MembershipLoginCommand, MembershipLoginHandler,
    RegisterCommand, RegisterHandler,
};

use super::dto::{
    AuthResponse, LoginRequest, LogoutResponse, MembershipLoginRequest, RegisterRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    register_handler: Arc<RegisterHandler>,
    login_handler: Arc<LoginHandler>,
    membership_login_handler: Arc<MembershipLoginHandler>,
    logout_handler: Arc<LogoutHandler>,
}

impl AuthHandlers {
    pub fn new(
        register_handler: Arc<RegisterHandler>,
        login_handler: Arc<LoginHandler>,
        membership_login_handler: Arc<MembershipLoginHandler>,
        logout_handler: Arc<LogoutHandler>,
    ) -> Self {
        Self {
            register_handler,
            login_handler,
            membership_login_handler,
            logout_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Create an account and log it in
pub async fn register(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let cmd = RegisterCommand {
        name: req.name,
        email: req.email,
        phone: req.phone,
        password: req.password,
    };

    match handlers.register_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(AuthResponse::new(result.user, result.session)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/auth/login - Email/password login
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let cmd = LoginCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.login_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AuthResponse::new(result.user, result.session)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/auth/membership-login - Phone/OTP login
pub async fn membership_login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<MembershipLoginRequest>,
) -> Response {
    let cmd = MembershipLoginCommand {
        phone: req.phone,
        otp: req.otp,
    };

    match handlers.membership_login_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AuthResponse::new(result.user, result.session)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/auth/logout - Delete the current session
pub async fn logout(
    State(handlers): State<AuthHandlers>,
    RequireSession(session): RequireSession,
) -> Response {
    match handlers.logout_handler.handle(session.session_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(LogoutResponse {
                message: "Logged out".to_string(),
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
