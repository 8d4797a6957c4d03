//! HTTP adapter for one-shot payment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    PaymentResponse, PaymentStatusResponse, ProcessPaymentRequest, ProcessPaymentResponse,
};
pub use handlers::PaymentHandlers;
pub use routes::payment_routes;
