//! Plan catalog query handlers.

mod list_plans;

pub use list_plans::ListPlansHandler;
