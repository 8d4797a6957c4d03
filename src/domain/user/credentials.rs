//! Password hashing.
//!
//! SHA-256 over a random per-user salt concatenated with the password,
//! hex-encoded. Verification compares in constant time.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// Salted password hash stored on the user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
}

impl PasswordHash {
    /// Hashes a password with a fresh random salt.
    pub fn create(password: &str) -> Self {
        let salt: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect();
        let hash = digest(&salt, password);
        Self { salt, hash }
    }

    /// Rebuilds a hash from stored columns.
    pub fn from_parts(salt: String, hash: String) -> Self {
        Self { salt, hash }
    }

    /// Checks a login attempt against the stored hash.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        candidate.as_bytes().ct_eq(self.hash.as_bytes()).into()
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
