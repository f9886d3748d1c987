//! Email/password credential verification.
//!
//! Flow Overview: reject empty input without touching the store, look the
//! account up by normalized email, then compare the password against the stored
//! Argon2 hash. An unknown email is still run through one Argon2 verification,
//! so both rejections cost the same. Every credential-level failure collapses
//! into `None`; only store failures surface as errors.

use thiserror::Error;
use tracing::{debug, instrument};

use super::{password::verify_password_or_unused, Identity};
use crate::store::{AccountStore, StoreError};

/// Why a login attempt was rejected. Internal only; callers outside this
/// module see a single "invalid credentials" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing email or password")]
    InvalidInput,
    #[error("no account for this email")]
    NoSuchAccount,
    #[error("password does not match")]
    PasswordMismatch,
}

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Verify a login attempt and keep the rejection reason.
///
/// # Errors
/// Returns [`StoreError`] when the account lookup itself fails.
pub async fn verify_detailed(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<Result<Identity, Rejection>, StoreError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Ok(Err(Rejection::InvalidInput));
    }

    let account = store.find_account_by_email(&email).await?;
    let password_matches = verify_password_or_unused(
        password,
        account.as_ref().map(|account| account.password_hash.as_str()),
    );

    let Some(account) = account else {
        return Ok(Err(Rejection::NoSuchAccount));
    };

    if !password_matches {
        return Ok(Err(Rejection::PasswordMismatch));
    }

    Ok(Ok(Identity {
        id: account.id,
        email: account.email,
    }))
}

/// Verify a login attempt.
///
/// Returns `Ok(None)` for any credential problem, wrong email and wrong
/// password alike.
///
/// # Errors
/// Returns [`StoreError`] when the account lookup itself fails; that is never
/// reported as a credential rejection.
#[instrument(skip(store, password))]
pub async fn verify(
    store: &dyn AccountStore,
    email: &str,
    password: &str,
) -> Result<Option<Identity>, StoreError> {
    match verify_detailed(store, email, password).await? {
        Ok(identity) => Ok(Some(identity)),
        Err(reason) => {
            debug!("login rejected: {reason}");
            Ok(None)
        }
    }
}
