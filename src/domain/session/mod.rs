//! Session domain: opaque bearer tokens with a fixed lifetime.

mod session;

pub use session::{Session, SESSION_TTL_HOURS};
