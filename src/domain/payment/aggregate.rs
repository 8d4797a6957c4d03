//! Payment aggregate entity.
//!
//! A Payment records one purchase: a one-shot plan charge, a two-part
//! installment purchase, or a subscription renewal. Money is i64 minor
//! units; once completed the row is immutable.
//!
//! # Invariants
//!
//! - `gateway_payment_id` is unique across payments when present (database
//!   constraint; makes webhook delivery idempotent)
//! - An installment purchase stays Pending until every installment is paid
//! - Status transitions follow [`PaymentStatus`] state machine rules

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, Money, PaymentId, PlanId, StateMachine, Timestamp, UserId,
};

use super::{PaymentKind, PaymentStatus};

/// Payment aggregate - one purchase by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    pub id: PaymentId,

    /// User who made the purchase.
    pub user_id: UserId,

    /// Plan being purchased.
    pub plan_id: PlanId,

    /// Total amount of the purchase.
    pub amount: Money,

    /// Current lifecycle status.
    pub status: PaymentStatus,

    /// What kind of purchase this settles.
    pub kind: PaymentKind,

    /// Gateway order id minted before collection.
    pub gateway_order_id: Option<String>,

    /// Gateway payment id reported after collection. Unique when present.
    pub gateway_payment_id: Option<String>,

    /// Payment method label reported by the gateway (card, upi, ...).
    pub method: Option<String>,

    /// When the payment was created.
    pub created_at: Timestamp,

    /// When the payment was last updated.
    pub updated_at: Timestamp,
}

impl Payment {
    /// Records a fully settled one-shot purchase.
    pub fn record_one_shot(
        id: PaymentId,
        user_id: UserId,
        plan_id: PlanId,
        amount: Money,
        gateway_order_id: String,
        gateway_payment_id: String,
        method: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            plan_id,
            amount,
            status: PaymentStatus::Completed,
            kind: PaymentKind::OneShot,
            gateway_order_id: Some(gateway_order_id),
            gateway_payment_id: Some(gateway_payment_id),
            method,
            created_at: now,
            updated_at: now,
        }
    }

    /// Starts an installment purchase.
    ///
    /// The payment stays Pending until both installments are paid; the
    /// first installment's gateway ids live on the installment rows.
    pub fn start_installments(
        id: PaymentId,
        user_id: UserId,
        plan_id: PlanId,
        amount: Money,
        gateway_order_id: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            plan_id,
            amount,
            status: PaymentStatus::Pending,
            kind: PaymentKind::Installment,
            gateway_order_id: Some(gateway_order_id),
            gateway_payment_id: None,
            method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a settled subscription renewal charge.
    pub fn record_renewal(
        id: PaymentId,
        user_id: UserId,
        plan_id: PlanId,
        amount: Money,
        gateway_payment_id: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            plan_id,
            amount,
            status: PaymentStatus::Completed,
            kind: PaymentKind::Renewal,
            gateway_order_id: None,
            gateway_payment_id: Some(gateway_payment_id),
            method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the payment completed after all charges settled.
    ///
    /// # Errors
    ///
    /// Returns error if the payment is not Pending.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Completed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the payment failed.
    ///
    /// # Errors
    ///
    /// Returns error if the payment is not Pending.
    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.transition_to(PaymentStatus::Failed)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// True once the payment can no longer change.
    pub fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }

    fn transition_to(&mut self, target: PaymentStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition payment from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }
}
