//! HTTP adapter for auth endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AuthResponse, LoginRequest, MembershipLoginRequest, RegisterRequest, SessionResponse,
    UserResponse,
};
pub use handlers::AuthHandlers;
pub use routes::auth_routes;
