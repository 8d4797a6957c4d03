//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Accept any 4-digit OTP on the membership login endpoint.
    ///
    /// Stays on until a real OTP provider is wired in; turn off to refuse
    /// OTP logins entirely.
    #[serde(default = "default_demo_otp")]
    pub demo_otp_enabled: bool,

    /// How often the expired-session sweep runs, in seconds
    #[serde(default = "default_session_sweep")]
    pub session_sweep_interval_secs: u64,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_otp_enabled: default_demo_otp(),
            session_sweep_interval_secs: default_session_sweep(),
        }
    }
}

fn default_demo_otp() -> bool {
    true
}

fn default_session_sweep() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_otp_defaults_on() {
        let config = AuthConfig::default();
        assert!(config.demo_otp_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sweep_interval_is_rejected() {
        let config = AuthConfig {
            session_sweep_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
