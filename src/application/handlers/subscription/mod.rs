//! Subscription command handlers: lifecycle, auto-pay, renewals.

mod cancel_subscription;
mod create_subscription;
mod disable_auto_pay;
mod enable_auto_pay;
mod get_upcoming_renewals;
mod handle_failed_renewal;
mod process_renewal;

pub use cancel_subscription::CancelSubscriptionHandler;
pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use disable_auto_pay::DisableAutoPayHandler;
pub use enable_auto_pay::EnableAutoPayHandler;
pub use get_upcoming_renewals::{GetUpcomingRenewalsHandler, GetUpcomingRenewalsQuery};
pub use handle_failed_renewal::{HandleFailedRenewalCommand, HandleFailedRenewalHandler};
pub use process_renewal::{ProcessRenewalCommand, ProcessRenewalHandler, ProcessRenewalResult};
