//! Plan-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, Money, PlanId};

/// Plan catalog errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Plan was not found or is inactive.
    NotFound(PlanId),

    /// The tier has no installment scheme configured.
    InstallmentsUnavailable(PlanId),

    /// The configured installment amounts do not sum to the expected total.
    InstallmentMismatch { scheme_total: Money, expected: Money },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl PlanError {
    pub fn not_found(id: PlanId) -> Self {
        PlanError::NotFound(id)
    }

    pub fn installments_unavailable(id: PlanId) -> Self {
        PlanError::InstallmentsUnavailable(id)
    }

    pub fn installment_mismatch(scheme_total: Money, expected: Money) -> Self {
        PlanError::InstallmentMismatch {
            scheme_total,
            expected,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PlanError::Infrastructure(message.into())
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            PlanError::NotFound(id) => format!("Plan {} not found", id),
            PlanError::InstallmentsUnavailable(id) => {
                format!("Plan {} does not support installments", id)
            }
            PlanError::InstallmentMismatch {
                scheme_total,
                expected,
            } => format!(
                "Installment amounts sum to {} but plan total is {}",
                scheme_total, expected
            ),
            PlanError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            PlanError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PlanError {}

impl From<DomainError> for PlanError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PlanNotFound => {
                // Repository lost the id; keep the message.
                PlanError::Infrastructure(err.message)
            }
            _ => PlanError::Infrastructure(err.to_string()),
        }
    }
}
