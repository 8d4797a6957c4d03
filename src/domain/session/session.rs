//! Session entity.
//!
//! Sessions are the sole authorization mechanism: an opaque random token
//! with a fixed 24 hour expiry computed at mint time. Expiry is not
//! extended by activity.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionContext, SessionId, Timestamp, UserId};

/// Fixed session lifetime.
pub const SESSION_TTL_HOURS: i64 = 24;

const TOKEN_LEN: usize = 48;

/// One authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    pub id: SessionId,

    /// Authenticated user.
    pub user_id: UserId,

    /// Opaque bearer token.
    pub token: String,

    /// When the session was minted.
    pub created_at: Timestamp,

    /// When the session stops authorizing requests.
    pub expires_at: Timestamp,
}

impl Session {
    /// Mints a fresh session for a user.
    pub fn mint(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            user_id,
            token: generate_token(),
            created_at: now,
            expires_at: now.add_hours(SESSION_TTL_HOURS),
        }
    }

    /// True once the expiry instant has passed.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }

    /// Builds the request-scoped context this session authorizes.
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.id, self.user_id, self.expires_at)
    }
}

fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}
