//! User aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{PasswordHash, Preferences, UserError};

/// A registered learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Login email, unique across accounts.
    pub email: String,

    /// Contact phone, used for OTP login.
    pub phone: String,

    /// Salted password hash. Never serialized.
    #[serde(skip)]
    pub password: Option<PasswordHash>,

    /// Learner preferences.
    pub preferences: Preferences,

    /// When the account was created.
    pub created_at: Timestamp,

    /// When the account was last updated.
    pub updated_at: Timestamp,
}

impl User {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns a validation error on empty name, malformed email, empty
    /// phone, or a password shorter than 8 characters.
    pub fn register(
        name: String,
        email: String,
        phone: String,
        password: &str,
    ) -> Result<Self, UserError> {
        if name.trim().is_empty() {
            return Err(UserError::validation_failed("name", "must not be empty"));
        }
        if !email.contains('@') || email.trim().is_empty() {
            return Err(UserError::validation_failed("email", "must be an email address"));
        }
        if phone.trim().is_empty() {
            return Err(UserError::validation_failed("phone", "must not be empty"));
        }
        if password.len() < 8 {
            return Err(UserError::validation_failed(
                "password",
                "must be at least 8 characters",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            name,
            email,
            phone,
            password: Some(PasswordHash::create(password)),
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks a password login attempt.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on mismatch or when the account has no
    /// password (OTP-only account).
    pub fn verify_password(&self, password: &str) -> Result<(), UserError> {
        let stored = self
            .password
            .as_ref()
            .ok_or_else(UserError::invalid_credentials)?;
        if !stored.verify(password) {
            return Err(UserError::invalid_credentials());
        }
        Ok(())
    }

    /// Replaces the stored preferences.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
        self.updated_at = Timestamp::now();
    }
}
