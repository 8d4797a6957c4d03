//! Shared HTTP error envelope.
//!
//! Every failed request answers with the same JSON shape:
//!
//! ```json
//! { "success": false, "code": "PLAN_NOT_FOUND", "message": "Plan ... not found" }
//! ```
//!
//! Module handlers convert their domain errors into an [`ApiError`] which
//! carries the status code alongside the envelope body. Infrastructure
//! failures are logged here and answered with a generic message so internal
//! details never leak to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::booking::BookingError;
use crate::domain::foundation::AuthError;
use crate::domain::payment::PaymentError;
use crate::domain::plan::PlanError;
use crate::domain::subscription::SubscriptionError;
use crate::domain::user::UserError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
}

/// A domain error translated for the wire.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    /// Logs the underlying failure and answers with a generic 500.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => {
                Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
            }
            AuthError::InvalidToken => {
                Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
            }
            AuthError::SessionExpired => {
                Self::new(StatusCode::UNAUTHORIZED, "SESSION_EXPIRED", err.to_string())
            }
            AuthError::ServiceUnavailable(detail) => {
                tracing::error!(error = %detail, "auth backend unavailable");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Authentication is temporarily unavailable",
                )
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let message = err.message();
        match err {
            UserError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", message),
            UserError::EmailTaken { .. } => {
                Self::new(StatusCode::CONFLICT, "EMAIL_TAKEN", message)
            }
            UserError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", message)
            }
            UserError::OtpUnavailable => {
                Self::new(StatusCode::FORBIDDEN, "OTP_UNAVAILABLE", message)
            }
            UserError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            UserError::Infrastructure(detail) => Self::internal(detail),
        }
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        let message = err.message();
        match err {
            PlanError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "PLAN_NOT_FOUND", message),
            PlanError::InstallmentsUnavailable(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INSTALLMENTS_UNAVAILABLE", message)
            }
            // Misconfigured catalog data, not a client mistake.
            PlanError::InstallmentMismatch { .. } => Self::internal(message),
            PlanError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            PlanError::Infrastructure(detail) => Self::internal(detail),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        let message = err.message();
        match err {
            PaymentError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND", message)
            }
            PaymentError::InstallmentNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "INSTALLMENT_NOT_FOUND", message)
            }
            PaymentError::PlanNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "PLAN_NOT_FOUND", message)
            }
            PaymentError::InvalidSignature => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE", message)
            }
            PaymentError::InstallmentOutOfOrder { .. } => {
                Self::new(StatusCode::CONFLICT, "INSTALLMENT_OUT_OF_ORDER", message)
            }
            PaymentError::AlreadyProcessed { .. } => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_PAYMENT", message)
            }
            PaymentError::InvalidState { .. } => {
                Self::new(StatusCode::CONFLICT, "INVALID_STATE_TRANSITION", message)
            }
            PaymentError::GatewayFailed { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "GATEWAY_ERROR", message)
            }
            PaymentError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            PaymentError::Infrastructure(detail) => Self::internal(detail),
        }
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        let message = err.message();
        match err {
            SubscriptionError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "SUBSCRIPTION_NOT_FOUND", message)
            }
            SubscriptionError::InvalidState { .. } => {
                Self::new(StatusCode::CONFLICT, "INVALID_STATE_TRANSITION", message)
            }
            SubscriptionError::DuplicateRenewal { .. } => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_PAYMENT", message)
            }
            SubscriptionError::AutoPayRequired(_) => {
                Self::new(StatusCode::CONFLICT, "AUTO_PAY_REQUIRED", message)
            }
            SubscriptionError::GatewayFailed { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "GATEWAY_ERROR", message)
            }
            SubscriptionError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            SubscriptionError::Infrastructure(detail) => Self::internal(detail),
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        let message = err.message();
        match err {
            BookingError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND", message)
            }
            BookingError::NotOwner(_) => Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message),
            BookingError::AlreadyBooked(_) => {
                Self::new(StatusCode::CONFLICT, "ALREADY_BOOKED", message)
            }
            BookingError::SlotFull { .. } => {
                Self::new(StatusCode::CONFLICT, "SLOT_UNAVAILABLE", message)
            }
            BookingError::SlotInPast { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "SLOT_UNAVAILABLE", message)
            }
            BookingError::InvalidSlotId { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_FORMAT", message)
            }
            BookingError::InvalidState { .. } => {
                Self::new(StatusCode::CONFLICT, "INVALID_STATE_TRANSITION", message)
            }
            BookingError::ValidationFailed { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            }
            BookingError::Infrastructure(detail) => Self::internal(detail),
        }
    }
}
