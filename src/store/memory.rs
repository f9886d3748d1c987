use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use uuid::Uuid;

use super::{Account, AccountStore, CreateAccountError, StoreError};

/// In-process account store keyed by email.
///
/// Used by tests and local runs without a database. It counts lookups and can
/// be switched offline to exercise the store-failure path.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, Account>>,
    lookups: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account as-is, replacing any account with the same email.
    pub fn insert(&self, account: Account) {
        self.lock().insert(account.email.clone(), account);
    }

    /// Number of `find_account_by_email` calls served so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        // A poisoned map still holds consistent entries; keep serving it.
        self.accounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.lock().get(email).cloned())
    }

    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, CreateAccountError> {
        self.check_online()?;
        let mut accounts = self.lock();
        if accounts.contains_key(email) {
            return Err(CreateAccountError::AccountExists);
        }
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        accounts.insert(email.to_string(), account.clone());
        Ok(account)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        let created = store.create_account("a@b.com", "hash").await?;
        let found = store.find_account_by_email("a@b.com").await?;
        assert_eq!(found, Some(created));
        assert_eq!(store.lookups(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
        let store = MemoryAccountStore::new();
        store.create_account("a@b.com", "hash").await?;
        let second = store.create_account("a@b.com", "other").await;
        assert!(matches!(second, Err(CreateAccountError::AccountExists)));
        Ok(())
    }

    #[tokio::test]
    async fn offline_store_fails_lookups() {
        let store = MemoryAccountStore::new();
        store.set_offline(true);
        let result = store.find_account_by_email("a@b.com").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
