//! CreateSubscriptionHandler - Command handler for starting a subscription.

use std::sync::Arc;

use crate::domain::foundation::{PlanId, SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{PaymentGateway, PlanRepository, SubscriptionRepository};

/// Command to start a subscription on a plan.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub enable_auto_pay: bool,
}

/// Handler starting a subscription.
///
/// With auto-pay requested, the gateway plan and subscription are created
/// first; only a successful gateway setup reaches the database. Without
/// auto-pay the subscription is local-only until the user enables charging.
pub struct CreateSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    plans: Arc<dyn PlanRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateSubscriptionHandler {
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
        cmd: CreateSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let plan = self
            .plans
            .find_by_id(cmd.plan_id)
            .await
            .map_err(SubscriptionError::from)?
            .filter(|p| p.active)
            .ok_or_else(|| {
                SubscriptionError::validation_failed("plan_id", "plan not found or inactive")
            })?;

        let gateway_subscription_id = if cmd.enable_auto_pay {
            let gateway_plan_id = self
                .gateway
                .create_plan(&plan.name, plan.price, plan.validity_months)
                .await
                .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;
            let id = self
                .gateway
                .create_subscription(&gateway_plan_id)
                .await
                .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;
            Some(id)
        } else {
            None
        };

        let subscription = Subscription::create(
            SubscriptionId::new(),
            cmd.user_id,
            cmd.plan_id,
            plan.validity_months,
            gateway_subscription_id,
        );
        self.subscriptions.insert(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            auto_pay = subscription.auto_pay,
            "subscription created"
        );

        Ok(subscription)
    }
}
