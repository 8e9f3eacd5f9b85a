//! Admin password checking.
//!
//! The operator's hash is supplied through `ADMIN_PASSWORD_HASH`, so it is
//! whatever a shell or `.env` file hands over: possibly quoted, possibly with
//! a trailing newline. [`Argon2PasswordService::verify`] normalizes that
//! before parsing the PHC string.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use cms_core::ports::{AuthError, PasswordService};

/// Argon2id hashing with the crate's default cost parameters.
///
/// Verification accepts any Argon2 variant and cost encoded in the stored
/// hash, so hashes produced by other tools keep working.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let stored = normalize_stored_hash(stored);
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AuthError::HashingError(format!("stored hash is not a PHC string: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

fn normalize_stored_hash(stored: &str) -> &str {
    let trimmed = stored.trim();
    ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed)
}
