//! In-memory implementation of [`AccountStorage`].
//!
//! Mirrors the PostgreSQL store's contract, including the unique account
//! number and the text column widths, so callers can swap it in for tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::error::{AccountKey, StorageError, StorageResult};
use super::models::{Account, NewAccount, check_column_widths};
use super::storage::AccountStorage;

#[derive(Default)]
struct State {
    accounts: BTreeMap<i32, Account>,
    /// Last assigned id; ids are never reused, like a SERIAL column
    last_id: i32,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountStorage for InMemoryStore {
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn create(&self, account: &NewAccount) -> StorageResult<Account> {
        check_column_widths(
            &account.first_name,
            &account.last_name,
            &account.encrypted_password,
        )?;
        let mut state = self.state.write().await;
        if state.accounts.values().any(|a| a.number == account.number) {
            return Err(StorageError::DuplicateNumber(account.number));
        }

        state.last_id += 1;
        let created = Account::from_new(state.last_id, account.clone());
        state.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> StorageResult<()> {
        check_column_widths(
            &account.first_name,
            &account.last_name,
            &account.encrypted_password,
        )?;
        let mut state = self.state.write().await;
        let stored = state
            .accounts
            .get_mut(&account.id)
            .ok_or(StorageError::NotFound(AccountKey::Id(account.id)))?;

        stored.first_name = account.first_name.clone();
        stored.last_name = account.last_name.clone();
        stored.encrypted_password = account.encrypted_password.clone();
        stored.balance = account.balance;
        Ok(())
    }

    async fn delete(&self, id: i32) -> StorageResult<()> {
        self.state.write().await.accounts.remove(&id);
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<Account>> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> StorageResult<Account> {
        self.state
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(AccountKey::Id(id)))
    }

    async fn get_by_number(&self, number: i64) -> StorageResult<Account> {
        self.state
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or(StorageError::NotFound(AccountKey::Number(number)))
    }
}
