//! MembershipLoginHandler - Command handler for phone/OTP login.
//!
//! OTP delivery is not integrated: when the demo OTP flag is on (the
//! default), any 4-digit code logs an existing phone in. With the flag off
//! the endpoint refuses outright instead of pretending to validate.

use std::sync::Arc;

use crate::domain::session::Session;
use crate::domain::user::{User, UserError};
use crate::ports::{SessionRepository, UserRepository};

/// Command to log in with phone and OTP.
#[derive(Debug, Clone)]
pub struct MembershipLoginCommand {
    pub phone: String,
    pub otp: String,
}

/// A successful OTP login.
#[derive(Debug, Clone)]
pub struct MembershipLoginResult {
    pub user: User,
    pub session: Session,
}

/// Handler for phone/OTP login.
pub struct MembershipLoginHandler {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    demo_otp_enabled: bool,
}

impl MembershipLoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        demo_otp_enabled: bool,
    ) -> Self {
        Self {
            users,
            sessions,
            demo_otp_enabled,
        }
    }

    pub async fn handle(
        &self,
        cmd: MembershipLoginCommand,
    ) -> Result<MembershipLoginResult, UserError> {
        if !self.demo_otp_enabled {
            return Err(UserError::OtpUnavailable);
        }

        if cmd.otp.len() != 4 || !cmd.otp.chars().all(|c| c.is_ascii_digit()) {
            return Err(UserError::validation_failed("otp", "must be a 4-digit code"));
        }

        let user = self
            .users
            .find_by_phone(&cmd.phone)
            .await?
            .ok_or_else(UserError::invalid_credentials)?;

        let session = Session::mint(user.id);
        self.sessions.insert(&session).await?;

        tracing::info!(user_id = %user.id, "otp login");

        Ok(MembershipLoginResult { user, session })
    }
}
