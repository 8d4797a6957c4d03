//! Port for payment and installment persistence.
//!
//! Multi-row invariants (installment purchase creation, the final
//! installment settling its payment) are single methods here so an adapter
//! can run them inside one transaction.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InstallmentId, PaymentId, UserId};
use crate::domain::payment::{Installment, Payment};

/// A pending installment joined with its payment and plan, for the
/// reminder/pending listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInstallment {
    pub installment: Installment,
    pub payment: Payment,
    pub plan_name: String,
}

/// Payment and installment storage.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts a payment row on its own (one-shot purchases and renewals).
    ///
    /// A reused gateway payment id surfaces as
    /// `ErrorCode::DuplicatePayment`, backed by the unique constraint.
    async fn insert(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError>;

    async fn find_by_gateway_payment_id(
        &self,
        gateway_payment_id: &str,
    ) -> Result<Option<Payment>, DomainError>;

    /// Inserts a payment together with its full installment schedule in one
    /// transaction. Either everything lands or nothing does.
    async fn insert_installment_purchase(
        &self,
        payment: &Payment,
        installments: &[Installment],
    ) -> Result<(), DomainError>;

    async fn find_installment(
        &self,
        id: InstallmentId,
    ) -> Result<Option<Installment>, DomainError>;

    async fn installments_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Vec<Installment>, DomainError>;

    /// Persists a paid installment and its payment's (possibly completed)
    /// status in the same transaction, so a fully paid schedule is never
    /// observable next to a pending payment.
    async fn settle_installment(
        &self,
        payment: &Payment,
        installment: &Installment,
    ) -> Result<(), DomainError>;

    /// Pending installments of a user, due date ascending, joined with
    /// payment and plan.
    async fn list_pending_installments(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PendingInstallment>, DomainError>;
}
