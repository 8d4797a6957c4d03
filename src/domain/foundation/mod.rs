//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Speakwise domain.

mod auth;
mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, SessionContext};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    BookingId, InstallmentId, PaymentId, PlanId, SessionId, SubscriptionId, UserId,
};
pub use money::Money;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
