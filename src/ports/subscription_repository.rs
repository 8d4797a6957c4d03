//! Port for subscription persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::payment::Payment;
use crate::domain::subscription::Subscription;

/// Subscription storage.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    async fn find_by_id(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<Subscription>, DomainError>;

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError>;

    /// Persists status, auto-pay and billing-date changes.
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Persists a renewal: the renewal payment row and the advanced
    /// subscription in one transaction. A reused gateway payment id
    /// surfaces as `ErrorCode::DuplicatePayment` and nothing is written.
    async fn record_renewal(
        &self,
        subscription: &Subscription,
        payment: &Payment,
    ) -> Result<(), DomainError>;

    /// Active auto-pay subscriptions with `next_billing_date` in
    /// `[from, to)`.
    async fn list_billing_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Subscription>, DomainError>;
}
