//! Argon2id password hashing for new staff accounts.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher as _};

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "itportal_server::service::password_hasher";

/// Hashes plaintext passwords into PHC strings.
///
/// Uses Argon2id with the crate's default parameters and a fresh random salt
/// per call. The plaintext is never logged.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the PHC string (`$argon2id$...`) for `password`.
    ///
    /// Failures are reported as a 500 that does not reveal the cause.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing operation failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("user")
            })?;

        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn hash_is_verifiable_argon2id() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("portal-pass-123")?;

        assert!(hash.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!("{e}"))?;
        let argon2 = Argon2::default();
        assert!(argon2.verify_password(b"portal-pass-123", &parsed).is_ok());
        assert!(argon2.verify_password(b"wrong", &parsed).is_err());
        Ok(())
    }

    #[test]
    fn salts_differ_between_calls() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        assert_ne!(hasher.hash_password("same")?, hasher.hash_password("same")?);
        Ok(())
    }
}
