//! Payment domain: one-shot purchases, two-part installment plans and
//! gateway signature verification.

mod aggregate;
mod errors;
mod installment;
mod signature;
mod status;

pub use aggregate::Payment;
pub use errors::PaymentError;
pub use installment::{Installment, INSTALLMENT_COUNT};
pub use signature::GatewaySignatureVerifier;
pub use status::{InstallmentStatus, PaymentKind, PaymentStatus};
