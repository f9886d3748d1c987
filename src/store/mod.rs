//! Account persistence.
//!
//! Credential verification and registration only talk to the [`AccountStore`]
//! trait; the server wires in [`PgAccountStore`], tests use
//! [`MemoryAccountStore`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use self::memory::MemoryAccountStore;
pub use self::postgres::PgAccountStore;

/// A persisted account. `email` is stored normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Infrastructure failure while talking to the store.
///
/// Never mapped to "invalid credentials"; handlers answer it with a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account store query failed")]
    Query(#[from] sqlx::Error),
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum CreateAccountError {
    #[error("an account with this email already exists")]
    AccountExists,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact match on the (already normalized) email.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, CreateAccountError>;

    /// Cheap reachability check for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
