//! User domain: accounts, credentials and learner preferences.

mod aggregate;
mod credentials;
mod errors;
mod preferences;

pub use aggregate::User;
pub use credentials::PasswordHash;
pub use errors::UserError;
pub use preferences::{
    EnglishLevel, LearningGoal, Preferences, SkillFocus, SpeakingPartner,
};
