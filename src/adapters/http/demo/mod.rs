//! HTTP adapter for demo class endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{BookDemoClassRequest, BookingResponse, RescheduleBookingRequest, SlotsResponse};
pub use handlers::DemoHandlers;
pub use routes::demo_routes;
