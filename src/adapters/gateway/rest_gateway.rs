//! REST adapter for the payment gateway API.
//!
//! Speaks the gateway's JSON API with basic auth over the merchant key pair.
//! Amounts on the wire are minor units, matching [`Money`].

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;
use crate::ports::{GatewayError, GatewayOrder, OrderRequest, PaymentGateway};

/// Gateway API endpoint configuration.
#[derive(Clone)]
pub struct GatewayCredentials {
    key_id: String,
    key_secret: SecretString,
    base_url: String,
}

impl GatewayCredentials {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            base_url: "https://api.razorpay.com/v1".to_string(),
        }
    }

    /// Points the adapter at a different API host, for testing.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// REST implementation of the PaymentGateway port.
pub struct RestPaymentGateway {
    credentials: GatewayCredentials,
    http_client: reqwest::Client,
}

impl RestPaymentGateway {
    pub fn new(credentials: GatewayCredentials) -> Self {
        Self {
            credentials,
            http_client: reqwest::Client::new(),
        }
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, GatewayError> {
        let url = format!("{}{}", self.credentials.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.credentials.key_id,
                Some(self.credentials.key_secret.expose_secret()),
            )
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%status, path, "gateway rejected request");
            return Err(GatewayError::Rejected(format!("{}: {}", status, detail)));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Rejected(format!("malformed gateway response: {}", e)))
    }
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'static str,
    receipt: &'a str,
    notes: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
}

#[derive(Serialize)]
struct CreatePlanBody<'a> {
    period: &'static str,
    interval: u32,
    item: PlanItem<'a>,
}

#[derive(Serialize)]
struct PlanItem<'a> {
    name: &'a str,
    amount: i64,
    currency: &'static str,
}

#[derive(Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Serialize)]
struct CreateSubscriptionBody<'a> {
    plan_id: &'a str,
    total_count: u32,
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: request.amount.as_minor(),
            currency: "INR",
            receipt: &request.receipt,
            notes: &request.notes,
        };
        let response: OrderResponse = self.post("/orders", &body).await?;

        let amount = Money::from_minor(response.amount)
            .map_err(|e| GatewayError::Rejected(format!("invalid order amount: {}", e)))?;
        Ok(GatewayOrder {
            order_id: response.id,
            amount,
        })
    }

    async fn create_plan(
        &self,
        name: &str,
        amount: Money,
        interval_months: u32,
    ) -> Result<String, GatewayError> {
        let body = CreatePlanBody {
            period: "monthly",
            interval: interval_months,
            item: PlanItem {
                name,
                amount: amount.as_minor(),
                currency: "INR",
            },
        };
        let response: IdResponse = self.post("/plans", &body).await?;
        Ok(response.id)
    }

    async fn create_subscription(&self, gateway_plan_id: &str) -> Result<String, GatewayError> {
        let body = CreateSubscriptionBody {
            plan_id: gateway_plan_id,
            // Open-ended; renewals run until cancelled.
            total_count: 0,
        };
        let response: IdResponse = self.post("/subscriptions", &body).await?;
        Ok(response.id)
    }

    async fn cancel_subscription(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<(), GatewayError> {
        let path = format!("/subscriptions/{}/cancel", gateway_subscription_id);
        let _: IdResponse = self.post(&path, &serde_json::json!({})).await?;
        Ok(())
    }
}
