//! One-shot payment handlers.

mod get_payment_status;
mod process_payment;

pub use get_payment_status::GetPaymentStatusHandler;
pub use process_payment::{
    ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
};
