//! Installment entity.
//!
//! An installment belongs to exactly one payment. A two-part purchase
//! creates both rows up front: number 1 due immediately, number 2 due 30
//! days later. The amounts come from the plan's fixed scheme, so their sum
//! always equals the payment amount.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, InstallmentId, Money, PaymentId, StateMachine, Timestamp,
};
use crate::domain::plan::InstallmentScheme;

use super::InstallmentStatus;

/// Number of installments in a two-part purchase.
pub const INSTALLMENT_COUNT: u8 = 2;

/// One scheduled partial charge of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Unique identifier for this installment.
    pub id: InstallmentId,

    /// Payment this installment belongs to.
    pub payment_id: PaymentId,

    /// 1-based position in the schedule (1 or 2).
    pub number: u8,

    /// Amount of this charge.
    pub amount: Money,

    /// When the charge is due.
    pub due_date: Timestamp,

    /// Current status.
    pub status: InstallmentStatus,

    /// When the charge settled.
    pub paid_at: Option<Timestamp>,

    /// Gateway payment id for the settled charge.
    pub gateway_payment_id: Option<String>,
}

impl Installment {
    /// Builds the full schedule for a payment from the plan's fixed scheme.
    ///
    /// Installment 1 is due now, installment 2 after
    /// [`InstallmentScheme::SECOND_DUE_AFTER_DAYS`].
    pub fn schedule(payment_id: PaymentId, scheme: &InstallmentScheme) -> [Installment; 2] {
        let now = Timestamp::now();
        [
            Installment {
                id: InstallmentId::new(),
                payment_id,
                number: 1,
                amount: scheme.first_amount,
                due_date: now,
                status: InstallmentStatus::Pending,
                paid_at: None,
                gateway_payment_id: None,
            },
            Installment {
                id: InstallmentId::new(),
                payment_id,
                number: 2,
                amount: scheme.second_amount,
                due_date: now.add_days(InstallmentScheme::SECOND_DUE_AFTER_DAYS),
                status: InstallmentStatus::Pending,
                paid_at: None,
                gateway_payment_id: None,
            },
        ]
    }

    /// Marks this installment paid with the gateway's payment id.
    ///
    /// # Errors
    ///
    /// Returns error if the installment is already paid.
    pub fn mark_paid(&mut self, gateway_payment_id: String) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(InstallmentStatus::Paid)
            .map_err(|_| {
                DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("Installment {} is already paid", self.number),
                )
            })?;
        self.paid_at = Some(Timestamp::now());
        self.gateway_payment_id = Some(gateway_payment_id);
        Ok(())
    }

    /// True once the charge settled.
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(major: i64) -> Money {
        Money::from_major(major).unwrap()
    }

    fn scheme() -> InstallmentScheme {
        InstallmentScheme::new(money(1299), money(1200))
    }

    #[test]
    fn schedule_creates_two_pending_installments() {
        let payment_id = PaymentId::new();
        let [first, second] = Installment::schedule(payment_id, &scheme());

        assert_eq!(first.number, 1);
        assert_eq!(second.number, 2);
        assert_eq!(first.amount, money(1299));
        assert_eq!(second.amount, money(1200));
        assert!(!first.is_paid());
        assert!(!second.is_paid());
        assert_eq!(first.payment_id, payment_id);
        assert_eq!(second.payment_id, payment_id);
    }

    #[test]
    fn second_installment_is_due_thirty_days_later() {
        let [first, second] = Installment::schedule(PaymentId::new(), &scheme());
        let gap = second.due_date.duration_since(&first.due_date);
        assert_eq!(gap.num_days(), 30);
    }

    #[test]
    fn schedule_amounts_sum_to_scheme_total() {
        let [first, second] = Installment::schedule(PaymentId::new(), &scheme());
        assert_eq!(
            first.amount.checked_add(second.amount).unwrap(),
            scheme().total().unwrap()
        );
    }

    #[test]
    fn mark_paid_records_gateway_id_and_time() {
        let [mut first, _] = Installment::schedule(PaymentId::new(), &scheme());

        first.mark_paid("pay_123".to_string()).unwrap();

        assert!(first.is_paid());
        assert!(first.paid_at.is_some());
        assert_eq!(first.gateway_payment_id.as_deref(), Some("pay_123"));
    }

    #[test]
    fn mark_paid_twice_fails() {
        let [mut first, _] = Installment::schedule(PaymentId::new(), &scheme());

        first.mark_paid("pay_123".to_string()).unwrap();
        assert!(first.mark_paid("pay_456".to_string()).is_err());
        // First payment id wins.
        assert_eq!(first.gateway_payment_id.as_deref(), Some("pay_123"));
    }
}
