//! Request/response DTOs for subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::payment::PaymentResponse;
use crate::domain::subscription::{Subscription, SubscriptionStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub plan_id: String,
    #[serde(default)]
    pub enable_auto_pay: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRenewalRequest {
    pub gateway_payment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenewalFailedRequest {
    pub failure_reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpcomingRenewalsQuery {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    7
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub auto_pay: bool,
    pub next_billing_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_until: Option<String>,
    pub created_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            status: subscription.status,
            auto_pay: subscription.auto_pay,
            next_billing_date: subscription.next_billing_date.as_datetime().to_rfc3339(),
            grace_until: subscription
                .grace_until
                .map(|t| t.as_datetime().to_rfc3339()),
            created_at: subscription.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenewalResponse {
    pub subscription: SubscriptionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentResponse>,
    pub already_processed: bool,
}

/// One subscription due for charging, flattened for the billing caller.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingRenewalResponse {
    pub subscription_id: String,
    pub user_id: String,
    pub plan_id: String,
    pub next_billing_date: String,
}

impl From<Subscription> for UpcomingRenewalResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            subscription_id: subscription.id.to_string(),
            user_id: subscription.user_id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            next_billing_date: subscription.next_billing_date.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingRenewalsResponse {
    pub renewals: Vec<UpcomingRenewalResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PlanId, SubscriptionId, UserId};

    #[test]
    fn create_request_defaults_auto_pay_off() {
        let json = r#"{"plan_id":"b4c0ffee-0000-4000-8000-000000000000"}"#;
        let req: CreateSubscriptionRequest = serde_json::from_str(json).unwrap();
        assert!(!req.enable_auto_pay);
    }

    #[test]
    fn subscription_response_uses_snake_case_status() {
        let subscription = Subscription::create(
            SubscriptionId::new(),
            UserId::new(),
            PlanId::new(),
            12,
            None,
        );
        let json = serde_json::to_string(&SubscriptionResponse::from(subscription)).unwrap();
        assert!(json.contains("\"status\":\"active\""));
        assert!(!json.contains("grace_until"));
    }
}
