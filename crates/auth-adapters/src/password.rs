//! Argon2id password hashing with a random salt per password.
//! Hashes are stored as PHC strings, so parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use domains::{DomainError, PasswordHasher, Result};

#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| {
                tracing::error!(error = %err, "password hashing failed");
                DomainError::Internal("password hashing failed".into())
            })
    }

    /// Verifies a password against a stored PHC string.
    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|err| {
            tracing::error!(error = %err, "stored password hash is malformed");
            DomainError::Internal("stored password hash is malformed".into())
        })?;
        Ok(self
            .argon
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
