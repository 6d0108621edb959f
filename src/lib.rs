//! Account Store - PostgreSQL repository for bank accounts
//!
//! # Modules
//!
//! - [`account`] - `Account` model, `AccountStorage` trait, Postgres and in-memory stores
//! - [`db`] - Connection pool and row helpers
//! - [`config`] - YAML configuration (logging, connection parameters)
//! - [`logging`] - tracing subscriber bootstrap

pub mod account;
pub mod config;
pub mod db;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{
    Account, AccountKey, AccountStorage, InMemoryStore, NewAccount, PostgresStore, StorageError,
    StorageResult,
};
pub use config::{AppConfig, ConfigError, PostgresConfig};
pub use db::Database;
