//! Request/response DTOs for installment endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::payment::PaymentResponse;
use crate::application::handlers::installment::InstallmentPlanPreview;
use crate::domain::payment::{Installment, InstallmentStatus};
use crate::ports::{GatewayOrder, PendingInstallment};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstallmentPlanRequest {
    pub plan_id: String,

    /// Total the client expects to pay, in minor units.
    pub expected_total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentPlanResponse {
    pub first_amount: i64,
    pub second_amount: i64,
    pub total: i64,
    pub second_due_date: String,
}

impl From<InstallmentPlanPreview> for InstallmentPlanResponse {
    fn from(preview: InstallmentPlanPreview) -> Self {
        Self {
            first_amount: preview.first_amount.as_minor(),
            second_amount: preview.second_amount.as_minor(),
            total: preview.total.as_minor(),
            second_due_date: preview.second_due_date.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstallmentOrderRequest {
    pub plan_id: String,
    pub installment_number: u8,
    #[serde(default)]
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentOrderResponse {
    pub order_id: String,
    pub amount: i64,
}

impl From<GatewayOrder> for InstallmentOrderResponse {
    fn from(order: GatewayOrder) -> Self {
        Self {
            order_id: order.order_id,
            amount: order.amount.as_minor(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessFirstInstallmentRequest {
    pub plan_id: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSecondInstallmentRequest {
    pub payment_id: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentResponse {
    pub id: String,
    pub payment_id: String,
    pub number: u8,
    pub amount: i64,
    pub due_date: String,
    pub status: InstallmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

impl From<Installment> for InstallmentResponse {
    fn from(installment: Installment) -> Self {
        Self {
            id: installment.id.to_string(),
            payment_id: installment.payment_id.to_string(),
            number: installment.number,
            amount: installment.amount.as_minor(),
            due_date: installment.due_date.as_datetime().to_rfc3339(),
            status: installment.status,
            paid_at: installment
                .paid_at
                .map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentPurchaseResponse {
    pub payment: PaymentResponse,
    pub installments: Vec<InstallmentResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingInstallmentResponse {
    pub installment: InstallmentResponse,
    pub payment: PaymentResponse,
    pub plan_name: String,
}

impl From<PendingInstallment> for PendingInstallmentResponse {
    fn from(pending: PendingInstallment) -> Self {
        Self {
            installment: pending.installment.into(),
            payment: pending.payment.into(),
            plan_name: pending.plan_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingInstallmentsResponse {
    pub pending: Vec<PendingInstallmentResponse>,
}
