//! Plan catalog domain.

mod errors;
mod plan;

pub use errors::PlanError;
pub use plan::{InstallmentScheme, Plan};
