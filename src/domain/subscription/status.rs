//! Subscription lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Billing normally; renewals advance the billing date.
    Active,

    /// Auto-pay disabled by the user; no renewals are attempted.
    Paused,

    /// A renewal charge failed; access continues until the grace deadline.
    GracePeriod,

    /// Cancelled immediately, no proration. Terminal.
    Cancelled,
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            (Active, Paused)
                | (Active, GracePeriod)
                | (Active, Cancelled)
                | (Paused, Active)
                | (Paused, Cancelled)
                | (GracePeriod, Active)
                | (GracePeriod, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Active => vec![Paused, GracePeriod, Cancelled],
            Paused => vec![Active, Cancelled],
            GracePeriod => vec![Active, Cancelled],
            Cancelled => vec![],
        }
    }
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::GracePeriod => "grace_period",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}
