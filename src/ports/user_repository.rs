//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// User account storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account.
    ///
    /// A taken email surfaces as `ErrorCode::ValidationFailed` with the
    /// email in the details, backed by the unique index.
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Persists name and preference changes.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
