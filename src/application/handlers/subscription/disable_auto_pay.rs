//! DisableAutoPayHandler - Command handler for turning auto-pay off.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{PaymentGateway, SubscriptionRepository};

/// Handler stopping recurring gateway billing.
///
/// The gateway subscription is cancelled first; the local row then goes
/// paused. Idempotent when auto-pay is already off.
pub struct DisableAutoPayHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl DisableAutoPayHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            subscriptions,
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

        if !subscription.auto_pay {
            return Ok(subscription);
        }

        if let Some(gateway_subscription_id) = subscription.gateway_subscription_id.clone() {
            self.gateway
                .cancel_subscription(&gateway_subscription_id)
                .await
                .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;
        }

        subscription.disable_auto_pay()?;
        self.subscriptions.update(&subscription).await?;

        tracing::info!(subscription_id = %subscription.id, "auto-pay disabled");

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        MockPaymentGateway, MockSubscriptionRepository,
    };
    use crate::domain::foundation::PlanId;
    use crate::domain::subscription::SubscriptionStatus;

    fn auto_pay_subscription() -> Subscription {
        Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            3,
            Some("gw_sub_1".to_string()),
        )
    }

    #[tokio::test]
    async fn disabling_cancels_the_gateway_subscription_and_pauses() {
        let sub = auto_pay_subscription();
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let gateway = MockPaymentGateway::new();
        let handler = DisableAutoPayHandler::new(subs.clone(), gateway.clone());

        let updated = handler.handle(sub.id, sub.user_id).await.unwrap();

        assert!(!updated.auto_pay);
        assert_eq!(updated.status, SubscriptionStatus::Paused);
        assert_eq!(
            gateway.cancelled.lock().unwrap().as_slice(),
            ["gw_sub_1".to_string()]
        );
    }

    #[tokio::test]
    async fn disabling_twice_is_idempotent() {
        let sub = auto_pay_subscription();
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let gateway = MockPaymentGateway::new();
        let handler = DisableAutoPayHandler::new(subs, gateway.clone());

        handler.handle(sub.id, sub.user_id).await.unwrap();
        handler.handle(sub.id, sub.user_id).await.unwrap();

        assert_eq!(gateway.cancelled.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_outage_leaves_auto_pay_on() {
        let sub = auto_pay_subscription();
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler = DisableAutoPayHandler::new(subs.clone(), MockPaymentGateway::failing());

        let result = handler.handle(sub.id, sub.user_id).await;

        assert!(matches!(result, Err(SubscriptionError::GatewayFailed { .. })));
        assert!(subs.stored(sub.id).unwrap().auto_pay);
    }
}
