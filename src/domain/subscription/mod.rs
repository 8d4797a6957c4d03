//! Subscription domain: recurring plan access, auto-pay and renewals.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Subscription, GRACE_PERIOD_DAYS};
pub use errors::SubscriptionError;
pub use status::SubscriptionStatus;
