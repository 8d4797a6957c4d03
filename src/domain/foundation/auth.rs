//! Request-scoped authentication context.
//!
//! The session middleware validates an incoming token once and injects a
//! `SessionContext` into request extensions; handlers read it through an
//! extractor instead of re-parsing headers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SessionId, Timestamp, UserId};

/// Validated session data carried through a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Session this request was authorized under.
    pub session_id: SessionId,

    /// User the session belongs to.
    pub user_id: UserId,

    /// When the session expires. Fixed at creation, not sliding.
    pub expires_at: Timestamp,
}

impl SessionContext {
    pub fn new(session_id: SessionId, user_id: UserId, expires_at: Timestamp) -> Self {
        Self {
            session_id,
            user_id,
            expires_at,
        }
    }
}

/// Errors raised while validating a session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Session token is missing")]
    MissingToken,

    #[error("Session token is invalid")]
    InvalidToken,

    #[error("Session has expired")]
    SessionExpired,

    #[error("Auth backend unavailable: {0}")]
    ServiceUnavailable(String),
}
