//! HTTP handlers for installment endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::installment::{
    CreateInstallmentOrderCommand, CreateInstallmentOrderHandler, CreateInstallmentPlanCommand,
    CreateInstallmentPlanHandler, GetPendingInstallmentsHandler, ProcessFirstInstallmentCommand,
    ProcessFirstInstallmentHandler, ProcessSecondInstallmentCommand,
    ProcessSecondInstallmentHandler,
};
use crate::domain::foundation::{Money, PaymentId, PlanId};

use super::dto::{
    CreateInstallmentOrderRequest, CreateInstallmentPlanRequest, InstallmentOrderResponse,
    InstallmentPlanResponse, InstallmentPurchaseResponse, PendingInstallmentResponse,
    PendingInstallmentsResponse, ProcessFirstInstallmentRequest, ProcessSecondInstallmentRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InstallmentHandlers {
    create_plan_handler: Arc<CreateInstallmentPlanHandler>,
    create_order_handler: Arc<CreateInstallmentOrderHandler>,
    process_first_handler: Arc<ProcessFirstInstallmentHandler>,
    process_second_handler: Arc<ProcessSecondInstallmentHandler>,
    get_pending_handler: Arc<GetPendingInstallmentsHandler>,
}

impl InstallmentHandlers {
    pub fn new(
        create_plan_handler: Arc<CreateInstallmentPlanHandler>,
        create_order_handler: Arc<CreateInstallmentOrderHandler>,
        process_first_handler: Arc<ProcessFirstInstallmentHandler>,
        process_second_handler: Arc<ProcessSecondInstallmentHandler>,
        get_pending_handler: Arc<GetPendingInstallmentsHandler>,
    ) -> Self {
        Self {
            create_plan_handler,
            create_order_handler,
            process_first_handler,
            process_second_handler,
            get_pending_handler,
        }
    }
}

fn parse_plan_id(raw: &str) -> Result<PlanId, ApiError> {
    raw.parse::<PlanId>()
        .map_err(|_| ApiError::bad_request("plan_id must be a UUID"))
}

fn parse_payment_id(raw: &str) -> Result<PaymentId, ApiError> {
    raw.parse::<PaymentId>()
        .map_err(|_| ApiError::bad_request("payment_id must be a UUID"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/installments/plan - Preview the two-part split for a plan
pub async fn create_installment_plan(
    State(handlers): State<InstallmentHandlers>,
    RequireSession(_session): RequireSession,
    Json(req): Json<CreateInstallmentPlanRequest>,
) -> Response {
    let plan_id = match parse_plan_id(&req.plan_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let expected_total = match Money::from_minor(req.expected_total) {
        Ok(total) => total,
        Err(_) => return ApiError::bad_request("expected_total must not be negative").into_response(),
    };

    let cmd = CreateInstallmentPlanCommand {
        plan_id,
        expected_total,
    };

    match handlers.create_plan_handler.handle(cmd).await {
        Ok(preview) => {
            (StatusCode::OK, Json(InstallmentPlanResponse::from(preview))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/installments/order - Mint a gateway order for one installment
pub async fn create_installment_order(
    State(handlers): State<InstallmentHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateInstallmentOrderRequest>,
) -> Response {
    let plan_id = match parse_plan_id(&req.plan_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let payment_id = match req.payment_id.as_deref().map(parse_payment_id).transpose() {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = CreateInstallmentOrderCommand {
        user_id: session.user_id,
        plan_id,
        installment_number: req.installment_number,
        payment_id,
    };

    match handlers.create_order_handler.handle(cmd).await {
        Ok(order) => {
            (StatusCode::CREATED, Json(InstallmentOrderResponse::from(order))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/installments/first - Record the settled first installment
pub async fn process_first_installment(
    State(handlers): State<InstallmentHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<ProcessFirstInstallmentRequest>,
) -> Response {
    let plan_id = match parse_plan_id(&req.plan_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = ProcessFirstInstallmentCommand {
        user_id: session.user_id,
        plan_id,
        gateway_order_id: req.gateway_order_id,
        gateway_payment_id: req.gateway_payment_id,
        signature: req.signature,
        method: req.method,
    };

    match handlers.process_first_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(InstallmentPurchaseResponse {
                payment: result.payment.into(),
                installments: result.installments.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/installments/second - Record the settled second installment
pub async fn process_second_installment(
    State(handlers): State<InstallmentHandlers>,
    RequireSession(_session): RequireSession,
    Json(req): Json<ProcessSecondInstallmentRequest>,
) -> Response {
    let payment_id = match parse_payment_id(&req.payment_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = ProcessSecondInstallmentCommand {
        payment_id,
        gateway_order_id: req.gateway_order_id,
        gateway_payment_id: req.gateway_payment_id,
        signature: req.signature,
    };

    match handlers.process_second_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(InstallmentPurchaseResponse {
                payment: result.payment.into(),
                installments: vec![result.installment.into()],
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/installments/pending - Unpaid installments for the current user
pub async fn get_pending_installments(
    State(handlers): State<InstallmentHandlers>,
    RequireSession(session): RequireSession,
) -> Response {
    match handlers.get_pending_handler.handle(session.user_id).await {
        Ok(pending) => {
            let response = PendingInstallmentsResponse {
                pending: pending
                    .into_iter()
                    .map(PendingInstallmentResponse::from)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
