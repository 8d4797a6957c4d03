//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter; the router module wires
//! them together under `/api` behind the session middleware.

pub mod auth;
pub mod demo;
pub mod error;
pub mod installment;
pub mod middleware;
pub mod payment;
pub mod plan;
pub mod router;
pub mod subscription;
pub mod user;

pub use router::{api_router, ApiHandlers};
