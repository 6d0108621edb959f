//! PostgreSQL implementation of [`AccountStorage`].
//!
//! Uses runtime queries to avoid sqlx compile-time database connection.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use std::sync::Arc;

use super::error::{AccountKey, StorageError, StorageResult};
use super::models::{Account, NewAccount};
use super::storage::AccountStorage;
use crate::db::{Database, SafeRow};

const CREATE_ACCOUNT_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id                 SERIAL PRIMARY KEY,
        first_name         VARCHAR(100) NOT NULL,
        last_name          VARCHAR(100) NOT NULL,
        number             BIGINT NOT NULL UNIQUE,
        encrypted_password VARCHAR(255) NOT NULL,
        balance            BIGINT NOT NULL DEFAULT 0,
        created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, encrypted_password, balance, created_at";

/// Account store backed by a shared PostgreSQL pool
pub struct PostgresStore {
    db: Arc<Database>,
}

impl PostgresStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn fetch_one_by(&self, column: &str, key: AccountKey) -> StorageResult<Account> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE {column} = $1");
        let query = sqlx::query(&sql);
        let query = match key {
            AccountKey::Id(id) => query.bind(id),
            AccountKey::Number(number) => query.bind(number),
        };

        let row = query.fetch_optional(self.db.pool()).await?;
        match row {
            Some(r) => Ok(row_to_account(&r)?),
            None => {
                tracing::debug!(%key, "account lookup found no row");
                Err(StorageError::NotFound(key))
            }
        }
    }
}

#[async_trait]
impl AccountStorage for PostgresStore {
    async fn init(&self) -> StorageResult<()> {
        sqlx::query(CREATE_ACCOUNT_TABLE_SQL)
            .execute(self.db.pool())
            .await?;
        tracing::info!("account table ready");
        Ok(())
    }

    async fn create(&self, account: &NewAccount) -> StorageResult<Account> {
        let sql = format!(
            r#"INSERT INTO account
               (first_name, last_name, number, encrypted_password, balance, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {ACCOUNT_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.number)
            .bind(&account.encrypted_password)
            .bind(account.balance)
            .bind(account.created_at)
            .fetch_one(self.db.pool())
            .await?;

        let created = row_to_account(&row)?;
        tracing::debug!(id = created.id, number = created.number, "account created");
        Ok(created)
    }

    async fn update(&self, account: &Account) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE account
            SET first_name = $2, last_name = $3, encrypted_password = $4, balance = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.encrypted_password)
        .bind(account.balance)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(AccountKey::Id(account.id)));
        }
        tracing::debug!(id = account.id, "account updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "account delete");
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(row_to_account(&row)?);
        }
        Ok(out)
    }

    async fn get_by_id(&self, id: i32) -> StorageResult<Account> {
        self.fetch_one_by("id", AccountKey::Id(id)).await
    }

    async fn get_by_number(&self, number: i64) -> StorageResult<Account> {
        self.fetch_one_by("number", AccountKey::Number(number)).await
    }
}

/// Convert a database row to Account.
fn row_to_account(row: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: row.get_required("id")?,
        first_name: row.get_required("first_name")?,
        last_name: row.get_required("last_name")?,
        number: row.get_required("number")?,
        encrypted_password: row.get_required("encrypted_password")?,
        balance: row.get_required("balance")?,
        created_at: row.get_required("created_at")?,
    })
}
