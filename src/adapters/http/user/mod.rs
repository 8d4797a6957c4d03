//! HTTP adapter for user profile and preference endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::UserHandlers;
pub use routes::user_routes;
