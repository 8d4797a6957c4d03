//! Subscription aggregate entity.
//!
//! A subscription grants recurring plan access. With auto-pay enabled the
//! gateway charges each billing cycle and reports the renewal back; without
//! it the subscription sits paused until the user re-enables charging.
//!
//! # Invariants
//!
//! - `gateway_subscription_id` is present whenever auto-pay is enabled
//! - A failed renewal opens a fixed 7 day grace window; access survives
//!   until the deadline passes
//! - Status transitions follow [`SubscriptionStatus`] state machine rules

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, StateMachine, SubscriptionId, Timestamp, UserId};

use super::{SubscriptionError, SubscriptionStatus};

/// Days of continued access after a failed renewal charge.
pub const GRACE_PERIOD_DAYS: i64 = 7;

/// Subscription aggregate - recurring plan access for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier for this subscription.
    pub id: SubscriptionId,

    /// Subscribing user.
    pub user_id: UserId,

    /// Plan being renewed each cycle.
    pub plan_id: PlanId,

    /// Whether the gateway charges automatically each cycle.
    pub auto_pay: bool,

    /// Gateway-side subscription id. Present whenever auto-pay is on.
    pub gateway_subscription_id: Option<String>,

    /// Next date a renewal charge is due.
    pub next_billing_date: Timestamp,

    /// Grace deadline after a failed renewal, while in GracePeriod.
    pub grace_until: Option<Timestamp>,

    /// Current lifecycle status.
    pub status: SubscriptionStatus,

    /// When the subscription was created.
    pub created_at: Timestamp,

    /// When the subscription was last updated.
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Creates an active subscription with the first billing date one
    /// validity period out.
    pub fn create(
        id: SubscriptionId,
        user_id: UserId,
        plan_id: PlanId,
        validity_months: u32,
        gateway_subscription_id: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        let auto_pay = gateway_subscription_id.is_some();
        Self {
            id,
            user_id,
            plan_id,
            auto_pay,
            gateway_subscription_id,
            next_billing_date: now.add_months(i64::from(validity_months)),
            grace_until: None,
            status: SubscriptionStatus::Active,
            updated_at: now,
            created_at: now,
        }
    }

    /// Enables auto-pay with the gateway subscription that will charge it.
    ///
    /// Idempotent when auto-pay is already on. A paused subscription goes
    /// back to active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the subscription is cancelled or in grace.
    pub fn enable_auto_pay(
        &mut self,
        gateway_subscription_id: String,
    ) -> Result<(), SubscriptionError> {
        if self.auto_pay {
            return Ok(());
        }
        match self.status {
            SubscriptionStatus::Active => {}
            SubscriptionStatus::Paused => {
                self.status = self
                    .status
                    .transition_to(SubscriptionStatus::Active)
                    .map_err(|_| self.state_error("enable auto-pay"))?;
            }
            _ => return Err(self.state_error("enable auto-pay")),
        }
        self.auto_pay = true;
        self.gateway_subscription_id = Some(gateway_subscription_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Disables auto-pay and pauses billing.
    ///
    /// Idempotent when auto-pay is already off. Cancelling the gateway-side
    /// subscription is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the subscription is cancelled.
    pub fn disable_auto_pay(&mut self) -> Result<(), SubscriptionError> {
        if !self.auto_pay {
            return Ok(());
        }
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Paused)
            .map_err(|_| self.state_error("disable auto-pay"))?;
        self.auto_pay = false;
        self.gateway_subscription_id = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancels the subscription immediately. Terminal, no proration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if already cancelled.
    pub fn cancel(&mut self) -> Result<(), SubscriptionError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Cancelled)
            .map_err(|_| self.state_error("cancel"))?;
        self.auto_pay = false;
        self.grace_until = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records a settled renewal: advances the billing date one validity
    /// period and clears any grace window.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the subscription is active or in grace.
    pub fn record_renewal(&mut self, validity_months: u32) -> Result<(), SubscriptionError> {
        match self.status {
            SubscriptionStatus::Active => {}
            SubscriptionStatus::GracePeriod => {
                self.status = self
                    .status
                    .transition_to(SubscriptionStatus::Active)
                    .map_err(|_| self.state_error("renew"))?;
            }
            _ => return Err(self.state_error("renew")),
        }
        self.next_billing_date = self.next_billing_date.add_months(i64::from(validity_months));
        self.grace_until = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Records a failed renewal charge: opens the 7 day grace window.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the subscription is active.
    pub fn record_failed_renewal(&mut self) -> Result<(), SubscriptionError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::GracePeriod)
            .map_err(|_| self.state_error("mark renewal failed"))?;
        self.grace_until = Some(Timestamp::now().add_days(GRACE_PERIOD_DAYS));
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn state_error(&self, attempted: &str) -> SubscriptionError {
        SubscriptionError::invalid_state(self.status.as_str(), attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_with_auto_pay() -> Subscription {
        Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            1,
            Some("gw_sub_1".to_string()),
        )
    }

    #[test]
    fn create_with_gateway_id_enables_auto_pay() {
        let sub = active_with_auto_pay();
        assert!(sub.auto_pay);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.next_billing_date.is_after(&Timestamp::now()));
    }

    #[test]
    fn create_without_gateway_id_has_auto_pay_off() {
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            1,
            None,
        );
        assert!(!sub.auto_pay);
        assert!(sub.gateway_subscription_id.is_none());
    }

    #[test]
    fn disable_then_enable_round_trips_status() {
        let mut sub = active_with_auto_pay();
        sub.disable_auto_pay().unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Paused);
        assert!(!sub.auto_pay);
        assert!(sub.gateway_subscription_id.is_none());

        sub.enable_auto_pay("gw_sub_2".to_string()).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.gateway_subscription_id.as_deref(), Some("gw_sub_2"));
    }

    #[test]
    fn enable_auto_pay_is_idempotent() {
        let mut sub = active_with_auto_pay();
        sub.enable_auto_pay("gw_sub_other".to_string()).unwrap();
        // no-op, original gateway id kept
        assert_eq!(sub.gateway_subscription_id.as_deref(), Some("gw_sub_1"));
    }

    #[test]
    fn disable_auto_pay_is_idempotent() {
        let mut sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            1,
            None,
        );
        sub.disable_auto_pay().unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
    }

    #[test]
    fn renewal_advances_billing_date_from_previous_date() {
        let mut sub = active_with_auto_pay();
        let before = sub.next_billing_date;
        sub.record_renewal(1).unwrap();
        assert!(sub.next_billing_date.is_after(&before));
    }

    #[test]
    fn failed_renewal_opens_grace_window() {
        let mut sub = active_with_auto_pay();
        sub.record_failed_renewal().unwrap();
        assert_eq!(sub.status, SubscriptionStatus::GracePeriod);
        let grace = sub.grace_until.unwrap();
        assert!(grace.is_after(&Timestamp::now().add_days(GRACE_PERIOD_DAYS - 1)));
    }

    #[test]
    fn renewal_in_grace_recovers_to_active() {
        let mut sub = active_with_auto_pay();
        sub.record_failed_renewal().unwrap();
        sub.record_renewal(1).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.grace_until.is_none());
    }

    #[test]
    fn cancel_is_terminal() {
        let mut sub = active_with_auto_pay();
        sub.cancel().unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert!(sub.cancel().is_err());
        assert!(sub.record_renewal(1).is_err());
        assert!(sub.enable_auto_pay("gw".to_string()).is_err());
    }
}
