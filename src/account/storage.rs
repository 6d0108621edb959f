//! Storage contract for accounts
//!
//! Callers hold a `dyn AccountStorage` (or a generic) and never see the
//! backing database.

use async_trait::async_trait;

use super::error::StorageResult;
use super::models::{Account, NewAccount};

/// Account CRUD operations. Every call is a single statement against the
/// backing store: no retries, no multi-statement transactions.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Create the account table if it does not exist. Safe to call repeatedly.
    async fn init(&self) -> StorageResult<()>;

    /// Insert a new account and return it with the assigned `id`
    async fn create(&self, account: &NewAccount) -> StorageResult<Account>;

    /// Overwrite the mutable fields (names, password hash, balance) of the
    /// row with `account.id`. `number` and `created_at` are left as stored.
    ///
    /// Returns `NotFound` when no row has that id.
    async fn update(&self, account: &Account) -> StorageResult<()>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, id: i32) -> StorageResult<()>;

    /// All accounts; empty when the table is empty
    async fn list(&self) -> StorageResult<Vec<Account>>;

    async fn get_by_id(&self, id: i32) -> StorageResult<Account>;

    async fn get_by_number(&self, number: i64) -> StorageResult<Account>;
}
