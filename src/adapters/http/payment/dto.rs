//! Request/response DTOs for one-shot payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::payment::{Payment, PaymentKind, PaymentStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessPaymentRequest {
    pub plan_id: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// One recorded payment. Amount is in minor currency units.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub plan_id: String,
    pub amount: i64,
    pub status: PaymentStatus,
    pub kind: PaymentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            plan_id: payment.plan_id.to_string(),
            amount: payment.amount.as_minor(),
            status: payment.status,
            kind: payment.kind,
            gateway_order_id: payment.gateway_order_id,
            gateway_payment_id: payment.gateway_payment_id,
            method: payment.method,
            created_at: payment.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessPaymentResponse {
    pub payment: PaymentResponse,
    pub already_processed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusResponse {
    pub id: String,
    pub status: PaymentStatus,
    pub kind: PaymentKind,
    pub amount: i64,
}

impl From<Payment> for PaymentStatusResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            status: payment.status,
            kind: payment.kind,
            amount: payment.amount.as_minor(),
        }
    }
}
