//! HTTP adapter for subscription endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSubscriptionRequest, ProcessRenewalRequest, RenewalFailedRequest, RenewalResponse,
    SubscriptionResponse, UpcomingRenewalsResponse,
};
pub use handlers::SubscriptionHandlers;
pub use routes::subscription_routes;
