//! Payment gateway adapters.

mod rest_gateway;

pub use rest_gateway::{GatewayCredentials, RestPaymentGateway};
