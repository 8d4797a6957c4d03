//! Domain layer: entities, value objects and business rules.
//!
//! Pure logic with no I/O. Persistence and transport live in the adapters;
//! the application layer orchestrates between the two through ports.

pub mod booking;
pub mod foundation;
pub mod payment;
pub mod plan;
pub mod session;
pub mod subscription;
pub mod user;
