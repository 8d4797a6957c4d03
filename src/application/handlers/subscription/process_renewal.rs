//! ProcessRenewalHandler - Command handler for a settled renewal charge.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, PaymentId, SubscriptionId};
use crate::domain::payment::Payment;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{PlanRepository, SubscriptionRepository};

/// Command carrying the gateway's report of a renewal charge.
#[derive(Debug, Clone)]
pub struct ProcessRenewalCommand {
    pub subscription_id: SubscriptionId,
    pub gateway_payment_id: String,
}

/// Outcome of a renewal report.
#[derive(Debug, Clone)]
pub enum ProcessRenewalResult {
    /// The renewal was recorded and the billing date advanced.
    Renewed {
        subscription: Subscription,
        payment: Payment,
    },

    /// The same gateway payment was recorded earlier; the billing date did
    /// not advance a second time.
    AlreadyProcessed(Subscription),
}

/// Handler recording a renewal charge.
///
/// The gateway delivers renewal webhooks at least once. The renewal payment
/// row and the advanced billing date land in one transaction keyed on the
/// unique gateway payment id, so a duplicate delivery is answered without
/// advancing the date twice.
pub struct ProcessRenewalHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl ProcessRenewalHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            subscriptions,
            plans,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessRenewalCommand,
    ) -> Result<ProcessRenewalResult, SubscriptionError> {
        let mut subscription = self
            .subscriptions
            .find_by_id(cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;
        let plan = self
            .plans
            .find_by_id(subscription.plan_id)
            .await
            .map_err(SubscriptionError::from)?
            .ok_or_else(|| {
                SubscriptionError::validation_failed("plan_id", "plan no longer exists")
            })?;

        subscription.record_renewal(plan.validity_months)?;
        let payment = Payment::record_renewal(
            PaymentId::new(),
            subscription.user_id,
            subscription.plan_id,
            plan.price,
            cmd.gateway_payment_id.clone(),
        );

        match self
            .subscriptions
            .record_renewal(&subscription, &payment)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    subscription_id = %subscription.id,
                    next_billing_date = %subscription.next_billing_date,
                    "renewal recorded"
                );
                Ok(ProcessRenewalResult::Renewed {
                    subscription,
                    payment,
                })
            }
            Err(err) if err.code == ErrorCode::DuplicatePayment => {
                tracing::warn!(
                    subscription_id = %cmd.subscription_id,
                    gateway_payment_id = %cmd.gateway_payment_id,
                    "duplicate renewal delivery ignored"
                );
                // Nothing was written; answer with the stored state.
                let current = self
                    .subscriptions
                    .find_by_id(cmd.subscription_id)
                    .await?
                    .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;
                Ok(ProcessRenewalResult::AlreadyProcessed(current))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        plan_without_installments, MockPlanRepository, MockSubscriptionRepository,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::subscription::SubscriptionStatus;

    fn command(subscription_id: SubscriptionId, gp: &str) -> ProcessRenewalCommand {
        ProcessRenewalCommand {
            subscription_id,
            gateway_payment_id: gp.to_string(),
        }
    }

    #[tokio::test]
    async fn renewal_advances_the_billing_date_and_records_a_payment() {
        let plan = plan_without_installments();
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            plan.id,
            plan.validity_months,
            Some("gw_sub_1".to_string()),
        );
        let before = sub.next_billing_date;
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler =
            ProcessRenewalHandler::new(subs.clone(), MockPlanRepository::with_plans(vec![plan]));

        let result = handler.handle(command(sub.id, "pay_r1")).await.unwrap();

        match result {
            ProcessRenewalResult::Renewed {
                subscription,
                payment,
            } => {
                assert!(subscription.next_billing_date.is_after(&before));
                assert_eq!(payment.gateway_payment_id.as_deref(), Some("pay_r1"));
            }
            other => panic!("expected Renewed, got {:?}", other),
        }
        assert_eq!(subs.renewal_payments.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_delivery_does_not_advance_twice() {
        let plan = plan_without_installments();
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            plan.id,
            plan.validity_months,
            Some("gw_sub_1".to_string()),
        );
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler =
            ProcessRenewalHandler::new(subs.clone(), MockPlanRepository::with_plans(vec![plan]));

        let first = handler.handle(command(sub.id, "pay_r1")).await.unwrap();
        let advanced_to = match first {
            ProcessRenewalResult::Renewed { subscription, .. } => subscription.next_billing_date,
            other => panic!("expected Renewed, got {:?}", other),
        };

        let replay = handler.handle(command(sub.id, "pay_r1")).await.unwrap();
        match replay {
            ProcessRenewalResult::AlreadyProcessed(subscription) => {
                assert_eq!(subscription.next_billing_date, advanced_to);
            }
            other => panic!("expected AlreadyProcessed, got {:?}", other),
        }
        assert_eq!(subs.renewal_payments.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn renewal_in_grace_recovers_the_subscription() {
        let plan = plan_without_installments();
        let mut sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            plan.id,
            plan.validity_months,
            Some("gw_sub_1".to_string()),
        );
        sub.record_failed_renewal().unwrap();
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler =
            ProcessRenewalHandler::new(subs.clone(), MockPlanRepository::with_plans(vec![plan]));

        let result = handler.handle(command(sub.id, "pay_r2")).await.unwrap();
        match result {
            ProcessRenewalResult::Renewed { subscription, .. } => {
                assert_eq!(subscription.status, SubscriptionStatus::Active);
                assert!(subscription.grace_until.is_none());
            }
            other => panic!("expected Renewed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancelled_subscription_rejects_renewals() {
        let plan = plan_without_installments();
        let mut sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            plan.id,
            plan.validity_months,
            None,
        );
        sub.cancel().unwrap();
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler =
            ProcessRenewalHandler::new(subs, MockPlanRepository::with_plans(vec![plan]));

        let result = handler.handle(command(sub.id, "pay_r3")).await;
        assert!(matches!(result, Err(SubscriptionError::InvalidState { .. })));
    }
}
