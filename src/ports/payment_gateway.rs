//! Port to the external payment gateway.
//!
//! The gateway mints orders before collection, runs recurring billing for
//! auto-pay subscriptions, and signs completed payments. Signature
//! verification itself is domain logic
//! ([`crate::domain::payment::GatewaySignatureVerifier`]); this port covers
//! the outbound API calls.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Money;

/// Request to mint a gateway order before collecting a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount to collect.
    pub amount: Money,

    /// Merchant-side receipt reference.
    pub receipt: String,

    /// Free-form metadata echoed back by the gateway (installment number,
    /// installment count, plan id).
    pub notes: HashMap<String, String>,
}

/// Order minted by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrder {
    /// Gateway-side order id, later signed together with the payment id.
    pub order_id: String,

    /// Amount the order will collect.
    pub amount: Money,
}

/// Errors from the gateway API.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway could not be reached or timed out.
    #[error("payment gateway unreachable: {0}")]
    Unreachable(String),

    /// The gateway refused the request.
    #[error("payment gateway rejected the request: {0}")]
    Rejected(String),
}

/// Outbound payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mints an order for a one-off charge.
    async fn create_order(&self, request: OrderRequest) -> Result<GatewayOrder, GatewayError>;

    /// Registers a recurring billing plan with the gateway.
    async fn create_plan(
        &self,
        name: &str,
        amount: Money,
        interval_months: u32,
    ) -> Result<String, GatewayError>;

    /// Starts a recurring subscription on a gateway plan.
    async fn create_subscription(&self, gateway_plan_id: &str) -> Result<String, GatewayError>;

    /// Stops a recurring subscription at the gateway.
    async fn cancel_subscription(
        &self,
        gateway_subscription_id: &str,
    ) -> Result<(), GatewayError>;
}
