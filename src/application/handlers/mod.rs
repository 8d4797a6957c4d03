//! Command and query handlers, one module per bounded area.

pub mod auth;
pub mod booking;
pub mod installment;
pub mod payment;
pub mod plan;
pub mod subscription;
pub mod user;

#[cfg(test)]
pub mod test_support;
