//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / InstallmentNotFound / PlanNotFound | 404 |
//! | InvalidSignature | 401 |
//! | InstallmentOutOfOrder | 409 |
//! | AlreadyProcessed | 409 |
//! | InvalidState | 409 |
//! | GatewayFailed | 502 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, InstallmentId, PaymentId, PlanId};

/// Payment and installment workflow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Payment was not found.
    NotFound(PaymentId),

    /// Installment was not found.
    InstallmentNotFound(InstallmentId),

    /// Plan being purchased was not found or is inactive.
    PlanNotFound(PlanId),

    /// Gateway signature verification failed. Nothing was written.
    InvalidSignature,

    /// Installment 2 was attempted before installment 1 was paid.
    InstallmentOutOfOrder { payment_id: PaymentId },

    /// The gateway payment id was already recorded; duplicate delivery.
    AlreadyProcessed { gateway_payment_id: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Gateway call failed.
    GatewayFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl PaymentError {
    pub fn not_found(id: PaymentId) -> Self {
        PaymentError::NotFound(id)
    }

    pub fn installment_not_found(id: InstallmentId) -> Self {
        PaymentError::InstallmentNotFound(id)
    }

    pub fn plan_not_found(id: PlanId) -> Self {
        PaymentError::PlanNotFound(id)
    }

    pub fn invalid_signature() -> Self {
        PaymentError::InvalidSignature
    }

    pub fn out_of_order(payment_id: PaymentId) -> Self {
        PaymentError::InstallmentOutOfOrder { payment_id }
    }

    pub fn already_processed(gateway_payment_id: impl Into<String>) -> Self {
        PaymentError::AlreadyProcessed {
            gateway_payment_id: gateway_payment_id.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        PaymentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn gateway_failed(reason: impl Into<String>) -> Self {
        PaymentError::GatewayFailed {
            reason: reason.into(),
        }
    }

    pub fn validation_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            PaymentError::NotFound(id) => format!("Payment {} not found", id),
            PaymentError::InstallmentNotFound(id) => format!("Installment {} not found", id),
            PaymentError::PlanNotFound(id) => format!("Plan {} not found", id),
            PaymentError::InvalidSignature => "Invalid payment signature".to_string(),
            PaymentError::InstallmentOutOfOrder { payment_id } => format!(
                "First installment of payment {} must be paid first",
                payment_id
            ),
            PaymentError::AlreadyProcessed { gateway_payment_id } => format!(
                "Gateway payment {} was already processed",
                gateway_payment_id
            ),
            PaymentError::InvalidState { current, attempted } => {
                format!("Cannot {} while payment is {}", attempted, current)
            }
            PaymentError::GatewayFailed { reason } => {
                format!("Payment gateway error: {}", reason)
            }
            PaymentError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            PaymentError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}
