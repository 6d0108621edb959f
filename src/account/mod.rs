//! Account management module
//!
//! PostgreSQL-based storage for the `account` table, behind the
//! [`AccountStorage`] trait.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod storage;

// Re-export commonly used types
pub use error::{AccountKey, StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use models::{Account, NewAccount, hash_password};
pub use postgres::PostgresStore;
pub use storage::AccountStorage;

// Re-export Database from top-level db module
pub use crate::db::Database;
