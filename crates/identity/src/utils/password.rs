//! Password hashing and verification.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use std::sync::OnceLock;

use entry_config::{AuthConfig, PasswordScheme};
use sha2::{Digest, Sha256};
use thiserror::Error;

const ARGON2_PREFIX: &str = "$argon2";
const DECOY_PASSWORD: &str = "entry-decoy-password";

#[cfg(test)]
thread_local! {
    static ARGON2_VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Argon2 verifications run on the current thread so far
#[cfg(test)]
pub(crate) fn argon2_verifications() -> usize {
    ARGON2_VERIFICATIONS.with(|count| count.get())
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hashes new passwords and checks candidates against stored hashes.
///
/// New hashes use the configured [`PasswordScheme`]. Verification picks the
/// scheme from the stored hash itself, so rows written under either scheme
/// keep working after the setting changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator {
    scheme: PasswordScheme,
}

impl CredentialValidator {
    pub fn new(scheme: PasswordScheme) -> Self {
        Self { scheme }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.password_scheme)
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Hash a password for storage.
    ///
    /// Argon2 output embeds a fresh random salt, so repeated calls differ;
    /// the legacy SHA-256 scheme is deterministic.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        match self.scheme {
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|err| CredentialError::Hashing(err.to_string()))?;
                Ok(hash.to_string())
            }
            PasswordScheme::Sha256 => Ok(sha256_hex(password)),
        }
    }

    /// Check a candidate password against a stored hash
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> Result<bool, CredentialError> {
        if stored_hash.starts_with(ARGON2_PREFIX) {
            #[cfg(test)]
            ARGON2_VERIFICATIONS.with(|count| count.set(count.get() + 1));
            let parsed = PasswordHash::new(stored_hash).map_err(|_| CredentialError::MalformedHash)?;
            return match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(PasswordHashError::Password) => Ok(false),
                Err(err) => Err(CredentialError::Hashing(err.to_string())),
            };
        }

        Ok(constant_time_eq(
            sha256_hex(candidate).as_bytes(),
            stored_hash.as_bytes(),
        ))
    }

    /// Verify the candidate against a fixed hash of the configured scheme and
    /// discard the outcome.
    ///
    /// Used when there is no stored hash to check, so that rejecting an
    /// unknown username costs as much as rejecting a wrong password.
    pub fn verify_decoy(&self, candidate: &str) {
        let decoy = self.decoy_hash();
        let _ = self.verify(candidate, decoy);
    }

    fn decoy_hash(&self) -> &'static str {
        static ARGON2_DECOY: OnceLock<String> = OnceLock::new();
        static SHA256_DECOY: OnceLock<String> = OnceLock::new();

        match self.scheme {
            PasswordScheme::Argon2 => ARGON2_DECOY.get_or_init(|| {
                self.hash(DECOY_PASSWORD)
                    .unwrap_or_else(|_| sha256_hex(DECOY_PASSWORD))
            }),
            PasswordScheme::Sha256 => SHA256_DECOY.get_or_init(|| sha256_hex(DECOY_PASSWORD)),
        }
    }
}

fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
