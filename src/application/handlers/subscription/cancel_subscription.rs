//! CancelSubscriptionHandler - Command handler for cancellation.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{PaymentGateway, SubscriptionRepository};

/// Handler cancelling a subscription immediately. No proration, no
/// end-of-period access; the gateway subscription is torn down as well.
pub struct CancelSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CancelSubscriptionHandler {
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

        if let Some(gateway_subscription_id) = subscription.gateway_subscription_id.clone() {
            self.gateway
                .cancel_subscription(&gateway_subscription_id)
                .await
                .map_err(|e| SubscriptionError::gateway_failed(e.to_string()))?;
        }

        subscription.cancel()?;
        self.subscriptions.update(&subscription).await?;

        tracing::info!(subscription_id = %subscription.id, "subscription cancelled");

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

    #[tokio::test]
    async fn cancels_locally_and_at_the_gateway() {
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            3,
            Some("gw_sub_9".to_string()),
        );
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let gateway = MockPaymentGateway::new();
        let handler = CancelSubscriptionHandler::new(subs.clone(), gateway.clone());

        let updated = handler.handle(sub.id, sub.user_id).await.unwrap();

        assert_eq!(updated.status, SubscriptionStatus::Cancelled);
        assert_eq!(gateway.cancelled.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancelling_twice_is_an_invalid_state() {
        let sub = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            3,
            None,
        );
        let subs = MockSubscriptionRepository::with_subscription(sub.clone());
        let handler = CancelSubscriptionHandler::new(subs, MockPaymentGateway::new());

        handler.handle(sub.id, sub.user_id).await.unwrap();
        let result = handler.handle(sub.id, sub.user_id).await;

        assert!(matches!(result, Err(SubscriptionError::InvalidState { .. })));
    }
}
