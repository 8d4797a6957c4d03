//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | InvalidState | 409 |
//! | DuplicateRenewal | 409 |
//! | AutoPayRequired | 409 |
//! | GatewayFailed | 502 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, SubscriptionId};

/// Subscription workflow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Subscription was not found.
    NotFound(SubscriptionId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// The gateway payment id was already recorded for a renewal.
    DuplicateRenewal { gateway_payment_id: String },

    /// The operation needs auto-pay enabled on the subscription.
    AutoPayRequired(SubscriptionId),

    /// Gateway call failed.
    GatewayFailed { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn duplicate_renewal(gateway_payment_id: impl Into<String>) -> Self {
        SubscriptionError::DuplicateRenewal {
            gateway_payment_id: gateway_payment_id.into(),
        }
    }

    pub fn auto_pay_required(id: SubscriptionId) -> Self {
        SubscriptionError::AutoPayRequired(id)
    }

    pub fn gateway_failed(reason: impl Into<String>) -> Self {
        SubscriptionError::GatewayFailed {
            reason: reason.into(),
        }
    }

    pub fn validation_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubscriptionError::NotFound(id) => format!("Subscription {} not found", id),
            SubscriptionError::InvalidState { current, attempted } => {
                format!("Cannot {} while subscription is {}", attempted, current)
            }
            SubscriptionError::DuplicateRenewal { gateway_payment_id } => format!(
                "Renewal payment {} was already processed",
                gateway_payment_id
            ),
            SubscriptionError::AutoPayRequired(id) => {
                format!("Subscription {} does not have auto-pay enabled", id)
            }
            SubscriptionError::GatewayFailed { reason } => {
                format!("Payment gateway error: {}", reason)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            SubscriptionError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Infrastructure(err.to_string())
    }
}
