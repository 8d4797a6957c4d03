//! GetUpcomingRenewalsHandler - Query handler for auto-pay charges due soon.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetUpcomingRenewalsQuery {
    /// How many days ahead to look, counted from the start of today.
    pub days_ahead: u32,
}

/// Handler listing active auto-pay subscriptions whose next billing date
/// falls within the lookahead window. A date `days_ahead` days out is still
/// inside the window; one day further is not.
pub struct GetUpcomingRenewalsHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl GetUpcomingRenewalsHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        query: GetUpcomingRenewalsQuery,
    ) -> Result<Vec<Subscription>, SubscriptionError> {
        let from = Timestamp::start_of_today();
        let to = from.add_days(i64::from(query.days_ahead) + 1);
        let due = self.subscriptions.list_billing_between(from, to).await?;
        Ok(due)
    }
}
