//! Argon2id password hashing.
//!
//! Hashing is CPU-bound and takes a noticeable fraction of a second;
//! callers run these functions on a blocking thread.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use murmur_error::ext::ResultExt;
use murmur_error::Result;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not hash password")]
pub struct HashPasswordError;

#[derive(Debug, Error)]
#[error("Could not verify password")]
pub struct VerifyPasswordError;

/// Hashes a passphrase into a PHC string for the `password_hash` column.
pub fn hash(passphrase: &str) -> Result<String, HashPasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .change_context(HashPasswordError)?;

    Ok(hash.to_string())
}

/// Checks a passphrase against a stored PHC string. A mismatch is a
/// regular `false`, not an error.
pub fn verify(passphrase: &str, hash: &str) -> Result<bool, VerifyPasswordError> {
    let parsed = PasswordHash::new(hash).change_context(VerifyPasswordError)?;

    match Argon2::default().verify_password(passphrase.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error).change_context(VerifyPasswordError),
    }
}

#[cfg(test)]
mod tests {
    use super::{hash, verify};

    #[test]
    fn should_verify_the_right_passphrase_only() {
        let stored = hash("correct horse battery staple").unwrap();

        assert!(verify("correct horse battery staple", &stored).unwrap());
        assert!(!verify("incorrect horse", &stored).unwrap());
    }

    #[test]
    fn should_reject_a_mangled_stored_hash() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }
}
