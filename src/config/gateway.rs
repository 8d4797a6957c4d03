//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment gateway configuration.
///
/// The key secret doubles as the HMAC secret for payment signature
/// verification; it never appears in Debug output.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API key id sent as the basic-auth username
    pub key_id: String,

    /// API key secret, also the HMAC signing secret
    pub key_secret: SecretString,

    /// Override for the gateway API base URL (tests, sandboxes)
    pub base_url: Option<String>,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_KEY_SECRET"));
        }
        if let Some(url) = &self.base_url {
            if *environment == Environment::Production && !url.starts_with("https://") {
                return Err(ValidationError::GatewayMustBeHttps);
            }
        }
        Ok(())
    }
}
