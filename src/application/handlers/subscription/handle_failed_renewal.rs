//! HandleFailedRenewalHandler - Command handler for a declined renewal charge.

use std::sync::Arc;

use crate::domain::foundation::SubscriptionId;
use crate::domain::subscription::{Subscription, SubscriptionError, GRACE_PERIOD_DAYS};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct HandleFailedRenewalCommand {
    pub subscription_id: SubscriptionId,
    pub failure_reason: String,
}

/// Handler moving a subscription into its grace period after a declined
/// renewal charge. Access stays open until `grace_until`; a later successful
/// renewal reactivates the subscription.
pub struct HandleFailedRenewalHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl HandleFailedRenewalHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        cmd: HandleFailedRenewalCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let mut subscription = self
            .subscriptions
            .find_by_id(cmd.subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::not_found(cmd.subscription_id))?;

        subscription.record_failed_renewal()?;
        self.subscriptions.update(&subscription).await?;

        // TODO: enqueue a gateway retry once the billing worker lands;
        // today the gateway retries on its own schedule.
        tracing::warn!(
            subscription_id = %subscription.id,
            reason = %cmd.failure_reason,
            grace_days = GRACE_PERIOD_DAYS,
            grace_until = ?subscription.grace_until,
            "renewal charge failed, grace period started"
        );

        Ok(subscription)
    }
}
