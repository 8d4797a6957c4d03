//! EnableAutoPayHandler - Command handler for turning auto-pay on.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{PaymentGateway, PlanRepository, SubscriptionRepository};

/// Handler enabling recurring gateway billing on a subscription.
///
/// Idempotent: enabling an already auto-pay subscription changes nothing.
pub struct EnableAutoPayHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl EnableAutoPayHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        plans: Arc<dyn PlanRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            subscriptions,
            plans,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        subscription_id: SubscriptionId,
        user_id: UserId,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = self
            .subscriptions
            .find_by_id(subscription_id)
            .await?
            .filter(|s| s.user_id == user_id)
            .ok_or_else(|| SubscriptionError::not_found(subscription_id))?;

        if subscription.auto_pay {
            return Ok(subscription);
        }

        let plan = self
            .plans
            .find_by_id(subscription.plan_id)
            .await
            .map_err(SubscriptionError::from)?
            .ok_or_else(|| {
                SubscriptionError::validation_failed("plan_id", "plan no longer exists")
            })?;

        let gateway_plan_id = self
            .gateway
            .create_plan(&plan.name, plan.price, plan.validity_months)
            .await
            .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;
        let gateway_subscription_id = self
            .gateway
            .create_subscription(&gateway_plan_id)
            .await
            .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;

        subscription.enable_auto_pay(gateway_subscription_id)?;
        self.subscriptions.update(&subscription).await?;

        tracing::info!(subscription_id = %subscription.id, "auto-pay enabled");

        Ok(subscription)
    }
}
