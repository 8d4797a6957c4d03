//! Session middleware and extractors for axum.
//!
//! The middleware resolves the incoming token against the `SessionRepository`
//! port once per request and injects a [`SessionContext`] into request
//! extensions. Handlers read it back through the [`RequireSession`] extractor
//! instead of re-parsing headers.
//!
//! ```text
//! Request → session_middleware → injects SessionContext into extensions
//!                                        ↓
//!                                Handler → RequireSession extractor
//! ```
//!
//! Tokens are accepted from either place the mobile clients send them:
//!
//! ```text
//! Authorization: Bearer <token>
//! X-Session-ID: <token>
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, SessionContext, Timestamp};
use crate::ports::SessionRepository;

/// Middleware state, the session store behind the port.
pub type SessionState = Arc<dyn SessionRepository>;

/// Validates the session token and injects [`SessionContext`] into extensions.
///
/// A request without any token passes through untouched so public routes
/// keep working; protected handlers enforce authentication through
/// [`RequireSession`]. A token that is present but unknown or expired is
/// rejected here with a 401.
pub async fn session_middleware(
    State(sessions): State<SessionState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_token(&request) {
        Some(token) => token.to_string(),
        None => return next.run(request).await,
    };

    match resolve_session(&sessions, &token).await {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

fn extract_token(request: &Request) -> Option<&str> {
    let headers = request.headers();
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .or_else(|| headers.get("X-Session-ID").and_then(|h| h.to_str().ok()))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn resolve_session(
    sessions: &SessionState,
    token: &str,
) -> Result<SessionContext, AuthError> {
    let session = sessions
        .find_by_token(token)
        .await
        .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?
        .ok_or(AuthError::InvalidToken)?;

    if session.is_expired(&Timestamp::now()) {
        return Err(AuthError::SessionExpired);
    }

    Ok(session.context())
}

/// Extractor that requires an authenticated session.
///
/// Rejects with a 401 envelope when the middleware did not validate a token
/// for this request.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionContext);

impl<S> axum::extract::FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<SessionContext>()
                .cloned()
                .map(RequireSession)
                .ok_or(SessionRejection::Unauthenticated)
        })
    }
}

/// Rejection for requests that reached a protected handler without a session.
#[derive(Debug, Clone)]
pub enum SessionRejection {
    Unauthenticated,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            SessionRejection::Unauthenticated => {
                ApiError::unauthorized("Authentication required").into_response()
            }
        }
    }
}
