//! HTTP handlers for one-shot payment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::payment::{
    GetPaymentStatusHandler, ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
};
use crate::domain::foundation::{PaymentId, PlanId};
use crate::domain::payment::PaymentError;

use super::dto::{PaymentStatusResponse, ProcessPaymentRequest, ProcessPaymentResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PaymentHandlers {
    process_payment_handler: Arc<ProcessPaymentHandler>,
    get_status_handler: Arc<GetPaymentStatusHandler>,
}

impl PaymentHandlers {
    pub fn new(
        process_payment_handler: Arc<ProcessPaymentHandler>,
        get_status_handler: Arc<GetPaymentStatusHandler>,
    ) -> Self {
        Self {
            process_payment_handler,
            get_status_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/process - Record a settled one-shot purchase
pub async fn process_payment(
    State(handlers): State<PaymentHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<ProcessPaymentRequest>,
) -> Response {
    let plan_id = match req.plan_id.parse::<PlanId>() {
        Ok(id) => id,
        Err(_) => return ApiError::bad_request("plan_id must be a UUID").into_response(),
    };

    let cmd = ProcessPaymentCommand {
        user_id: session.user_id,
        plan_id,
        gateway_order_id: req.gateway_order_id,
        gateway_payment_id: req.gateway_payment_id,
        signature: req.signature,
        method: req.method,
    };

    match handlers.process_payment_handler.handle(cmd).await {
        Ok(ProcessPaymentResult::Recorded(payment)) => (
            StatusCode::CREATED,
            Json(ProcessPaymentResponse {
                payment: payment.into(),
                already_processed: false,
            }),
        )
            .into_response(),
        Ok(ProcessPaymentResult::AlreadyProcessed(payment)) => (
            StatusCode::OK,
            Json(ProcessPaymentResponse {
                payment: payment.into(),
                already_processed: true,
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/payments/:id/status - Status projection for one payment
pub async fn get_payment_status(
    State(handlers): State<PaymentHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Response {
    let payment_id = match id.parse::<PaymentId>() {
        Ok(id) => id,
        Err(_) => return ApiError::bad_request("payment id must be a UUID").into_response(),
    };

    match handlers.get_status_handler.handle(payment_id).await {
        // Another user's payment reads as absent rather than forbidden.
        Ok(payment) if payment.user_id != session.user_id => {
            ApiError::from(PaymentError::not_found(payment_id)).into_response()
        }
        Ok(payment) => {
            (StatusCode::OK, Json(PaymentStatusResponse::from(payment))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
