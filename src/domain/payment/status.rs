//! Payment and installment status state machines.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a payment.
///
/// A payment is immutable once completed; failed is terminal as well (a new
/// purchase starts a new payment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Purchase started, not all charges settled yet.
    Pending,

    /// All charges settled. Terminal.
    Completed,

    /// Purchase failed. Terminal.
    Failed,
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!((self, target), (Pending, Completed) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Completed, Failed],
            Completed => vec![],
            Failed => vec![],
        }
    }
}

/// Status of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet charged.
    Pending,

    /// Charged and verified. Terminal.
    Paid,
}

impl StateMachine for InstallmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InstallmentStatus::*;
        matches!((self, target), (Pending, Paid))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InstallmentStatus::*;
        match self {
            Pending => vec![Paid],
            Paid => vec![],
        }
    }
}

/// What kind of purchase a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Full plan price charged at once.
    OneShot,

    /// Two-part installment purchase.
    Installment,

    /// Recurring subscription renewal charge.
    Renewal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_payment_can_complete_or_fail() {
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Completed));
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn completed_payment_is_terminal() {
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
    }

    #[test]
    fn completed_payment_cannot_revert() {
        assert!(!PaymentStatus::Completed.can_transition_to(&PaymentStatus::Pending));
        assert!(!PaymentStatus::Completed.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn installment_goes_pending_to_paid_only() {
        assert!(InstallmentStatus::Pending.can_transition_to(&InstallmentStatus::Paid));
        assert!(InstallmentStatus::Paid.is_terminal());
    }
}
