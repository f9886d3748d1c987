//! Argon2id password hashing.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;
use std::sync::OnceLock;

/// Throwaway hash compared against when no account matches. `None` if
/// hashing failed at first use.
static UNUSED_ACCOUNT_HASH: OnceLock<Option<String>> = OnceLock::new();

fn unused_account_hash() -> Option<&'static str> {
    UNUSED_ACCOUNT_HASH
        .get_or_init(|| hash_password("gatehouse-unused-account").ok())
        .as_deref()
}

/// Hash a plaintext password into a PHC string (`$argon2id$v=19$...`).
///
/// # Errors
/// Returns an error if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

/// Check `password` against a stored PHC string.
///
/// A malformed stored hash never matches.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Like [`verify_password`], but a missing account still pays for a full
/// Argon2 verification before answering `false`.
#[must_use]
pub fn verify_password_or_unused(password: &str, stored_hash: Option<&str>) -> bool {
    match stored_hash {
        Some(stored_hash) => verify_password(password, stored_hash),
        None => {
            if let Some(unused) = unused_account_hash() {
                let _ = verify_password(password, unused);
            }
            false
        }
    }
}
