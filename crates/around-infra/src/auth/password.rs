//! Plaintext password comparison.

use around_core::ports::{AuthError, PasswordService};

/// Stores passwords as given and compares them byte-for-byte.
///
/// SECURITY: this is a known deficiency kept for compatibility with the
/// existing user records. Passwords are neither hashed nor compared in
/// constant time. Swap in a hashing implementation of `PasswordService`
/// together with a migration of stored records.
#[derive(Debug, Default)]
pub struct PlaintextPasswordService;

impl PlaintextPasswordService {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordService for PlaintextPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        Ok(password.as_bytes() == stored.as_bytes())
    }
}
