//! HTTP handlers for the plan catalog.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::plan::ListPlansHandler;

use super::dto::{PlanListResponse, PlanResponse};

#[derive(Clone)]
pub struct PlanHandlers {
    list_plans_handler: Arc<ListPlansHandler>,
}

impl PlanHandlers {
    pub fn new(list_plans_handler: Arc<ListPlansHandler>) -> Self {
        Self { list_plans_handler }
    }
}

/// GET /api/plans - Active plans in display order
pub async fn list_plans(State(handlers): State<PlanHandlers>) -> Response {
    match handlers.list_plans_handler.handle().await {
        Ok(plans) => {
            let response = PlanListResponse {
                plans: plans.into_iter().map(PlanResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
