//! Gateway payment signature verification.
//!
//! The gateway signs each completed payment with HMAC-SHA256 over
//! `order_id|payment_id` using the shared key secret, hex-encoded. The
//! signature MUST be verified before any row is written; comparison is
//! constant-time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::PaymentError;

/// Verifier for gateway payment signatures.
pub struct GatewaySignatureVerifier {
    secret: Secret<String>,
}

impl GatewaySignatureVerifier {
    /// Creates a new verifier with the shared gateway secret.
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// Verifies the signature the gateway reported for a payment.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidSignature` on a hex-malformed or
    /// mismatched signature.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature_hex: &str,
    ) -> Result<(), PaymentError> {
        let provided =
            hex::decode(signature_hex).map_err(|_| PaymentError::invalid_signature())?;
        let expected = self.compute(order_id, payment_id);

        if !constant_time_compare(&expected, &provided) {
            return Err(PaymentError::invalid_signature());
        }
        Ok(())
    }

    /// Produces the hex-encoded signature for a payment, as the gateway would.
    ///
    /// Used by the mock gateway and test fixtures.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        hex::encode(self.compute(order_id, payment_id))
    }

    fn compute(&self, order_id: &str, payment_id: &str) -> Vec<u8> {
        let signed_payload = format!("{}|{}", order_id, payment_id);
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
