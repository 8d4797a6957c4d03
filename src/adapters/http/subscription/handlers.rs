//! HTTP handlers for subscription endpoints.
//!
//! The renewal and renewal-failed endpoints are driven by the payment
//! gateway's billing callbacks rather than a logged-in client, so they do
//! not require a session. Everything the user drives does.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireSession;
use crate::application::handlers::subscription::{
    CancelSubscriptionHandler, CreateSubscriptionCommand, CreateSubscriptionHandler,
    DisableAutoPayHandler, EnableAutoPayHandler, GetUpcomingRenewalsHandler,
    GetUpcomingRenewalsQuery, HandleFailedRenewalCommand, HandleFailedRenewalHandler,
    ProcessRenewalCommand, ProcessRenewalHandler, ProcessRenewalResult,
};
use crate::domain::foundation::{PlanId, SubscriptionId};

use super::dto::{
    CreateSubscriptionRequest, ProcessRenewalRequest, RenewalFailedRequest, RenewalResponse,
    SubscriptionResponse, UpcomingRenewalResponse, UpcomingRenewalsQuery,
    UpcomingRenewalsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SubscriptionHandlers {
    create_handler: Arc<CreateSubscriptionHandler>,
    enable_auto_pay_handler: Arc<EnableAutoPayHandler>,
    disable_auto_pay_handler: Arc<DisableAutoPayHandler>,
    cancel_handler: Arc<CancelSubscriptionHandler>,
    process_renewal_handler: Arc<ProcessRenewalHandler>,
    failed_renewal_handler: Arc<HandleFailedRenewalHandler>,
    upcoming_renewals_handler: Arc<GetUpcomingRenewalsHandler>,
}

impl SubscriptionHandlers {
    pub fn new(
        create_handler: Arc<CreateSubscriptionHandler>,
        enable_auto_pay_handler: Arc<EnableAutoPayHandler>,
        disable_auto_pay_handler: Arc<DisableAutoPayHandler>,
        cancel_handler: Arc<CancelSubscriptionHandler>,
        process_renewal_handler: Arc<ProcessRenewalHandler>,
        failed_renewal_handler: Arc<HandleFailedRenewalHandler>,
        upcoming_renewals_handler: Arc<GetUpcomingRenewalsHandler>,
    ) -> Self {
        Self {
            create_handler,
            enable_auto_pay_handler,
            disable_auto_pay_handler,
            cancel_handler,
            process_renewal_handler,
            failed_renewal_handler,
            upcoming_renewals_handler,
        }
    }
}

fn parse_subscription_id(raw: &str) -> Result<SubscriptionId, ApiError> {
    raw.parse::<SubscriptionId>()
        .map_err(|_| ApiError::bad_request("subscription id must be a UUID"))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/subscriptions - Start a subscription
pub async fn create_subscription(
    State(handlers): State<SubscriptionHandlers>,
    RequireSession(session): RequireSession,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Response {
    let plan_id = match req.plan_id.parse::<PlanId>() {
        Ok(id) => id,
        Err(_) => return ApiError::bad_request("plan_id must be a UUID").into_response(),
    };

    let cmd = CreateSubscriptionCommand {
        user_id: session.user_id,
        plan_id,
        enable_auto_pay: req.enable_auto_pay,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(subscription) => (
            StatusCode::CREATED,
            Json(SubscriptionResponse::from(subscription)),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/subscriptions/:id/auto-pay/enable
pub async fn enable_auto_pay(
    State(handlers): State<SubscriptionHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Response {
    let subscription_id = match parse_subscription_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .enable_auto_pay_handler
        .handle(subscription_id, session.user_id)
        .await
    {
        Ok(subscription) => {
            (StatusCode::OK, Json(SubscriptionResponse::from(subscription))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/subscriptions/:id/auto-pay/disable
pub async fn disable_auto_pay(
    State(handlers): State<SubscriptionHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Response {
    let subscription_id = match parse_subscription_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .disable_auto_pay_handler
        .handle(subscription_id, session.user_id)
        .await
    {
        Ok(subscription) => {
            (StatusCode::OK, Json(SubscriptionResponse::from(subscription))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/subscriptions/:id/cancel
pub async fn cancel_subscription(
    State(handlers): State<SubscriptionHandlers>,
    RequireSession(session): RequireSession,
    Path(id): Path<String>,
) -> Response {
    let subscription_id = match parse_subscription_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers
        .cancel_handler
        .handle(subscription_id, session.user_id)
        .await
    {
        Ok(subscription) => {
            (StatusCode::OK, Json(SubscriptionResponse::from(subscription))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/subscriptions/:id/renewal - Gateway reports a settled renewal
pub async fn process_renewal(
    State(handlers): State<SubscriptionHandlers>,
    Path(id): Path<String>,
    Json(req): Json<ProcessRenewalRequest>,
) -> Response {
    let subscription_id = match parse_subscription_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = ProcessRenewalCommand {
        subscription_id,
        gateway_payment_id: req.gateway_payment_id,
    };

    match handlers.process_renewal_handler.handle(cmd).await {
        Ok(ProcessRenewalResult::Renewed {
            subscription,
            payment,
        }) => (
            StatusCode::OK,
            Json(RenewalResponse {
                subscription: subscription.into(),
                payment: Some(payment.into()),
                already_processed: false,
            }),
        )
            .into_response(),
        Ok(ProcessRenewalResult::AlreadyProcessed(subscription)) => (
            StatusCode::OK,
            Json(RenewalResponse {
                subscription: subscription.into(),
                payment: None,
                already_processed: true,
            }),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/subscriptions/:id/renewal-failed - Gateway reports a failed charge
pub async fn renewal_failed(
    State(handlers): State<SubscriptionHandlers>,
    Path(id): Path<String>,
    Json(req): Json<RenewalFailedRequest>,
) -> Response {
    let subscription_id = match parse_subscription_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = HandleFailedRenewalCommand {
        subscription_id,
        failure_reason: req.failure_reason,
    };

    match handlers.failed_renewal_handler.handle(cmd).await {
        Ok(subscription) => {
            (StatusCode::OK, Json(SubscriptionResponse::from(subscription))).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET /api/subscriptions/upcoming-renewals - Subscriptions due for charging
pub async fn upcoming_renewals(
    State(handlers): State<SubscriptionHandlers>,
    Query(query): Query<UpcomingRenewalsQuery>,
) -> Response {
    let query = GetUpcomingRenewalsQuery {
        days_ahead: query.days_ahead,
    };

    match handlers.upcoming_renewals_handler.handle(query).await {
        Ok(subscriptions) => {
            let response = UpcomingRenewalsResponse {
                renewals: subscriptions
                    .into_iter()
                    .map(UpcomingRenewalResponse::from)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
