//! User profile and preference handlers.

mod get_profile;
mod update_preferences;

pub use get_profile::GetProfileHandler;
pub use update_preferences::{PreferenceUpdate, UpdatePreferencesHandler};
