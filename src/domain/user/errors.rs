//! User-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | EmailTaken | 409 |
//! | InvalidCredentials | 401 |
//! | OtpUnavailable | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, UserId};

/// User account and preference errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(UserId),

    /// Another account already uses the email.
    EmailTaken { email: String },

    /// Email/password or phone/OTP did not match.
    InvalidCredentials,

    /// OTP login is not available in this deployment.
    OtpUnavailable,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        UserError::EmailTaken {
            email: email.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        UserError::InvalidCredentials
    }

    pub fn validation_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User {} not found", id),
            UserError::EmailTaken { email } => {
                format!("An account with email {} already exists", email)
            }
            UserError::InvalidCredentials => "Invalid credentials".to_string(),
            UserError::OtpUnavailable => {
                "OTP login is not available".to_string()
            }
            UserError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            UserError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        UserError::Infrastructure(err.to_string())
    }
}
