//! HTTP adapter for the plan catalog.

mod dto;
mod handlers;
mod routes;

pub use dto::{PlanListResponse, PlanResponse};
pub use handlers::PlanHandlers;
pub use routes::plan_routes;
