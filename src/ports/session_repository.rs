//! Port for session persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;

/// Session token storage.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// Looks a session up by its opaque token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Session>, DomainError>;

    /// Removes a session. Logout of an already-removed session is a no-op.
    async fn delete(&self, id: SessionId) -> Result<(), DomainError>;

    /// Removes every session past its expiry. Returns how many went.
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
