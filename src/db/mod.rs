//! Database connection management

use crate::config::{ConfigError, PostgresConfig};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Errors raised while establishing the pool
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// PostgreSQL database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a pool from explicit connection parameters and ping it once
    pub async fn connect(config: &PostgresConfig) -> Result<Self, ConnectError> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.health_check().await?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "PostgreSQL connection pool established"
        );
        Ok(db)
    }

    /// Create a pool from a connection URL (tests and tooling)
    pub async fn connect_url(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Extension trait for row access with logging
pub trait SafeRow {
    /// Get a column value. A failure is logged and the driver error is
    /// returned unchanged.
    fn get_required<'r, T>(&'r self, column: &str) -> Result<T, sqlx::Error>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>;
}

impl SafeRow for sqlx::postgres::PgRow {
    fn get_required<'r, T>(&'r self, column: &str) -> Result<T, sqlx::Error>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        use sqlx::Row;
        self.try_get(column)
            .inspect_err(|e| tracing::error!("Failed to read column '{}': {}", column, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require a running PostgreSQL instance
    // Run with: docker run -p 5432:5432 -e POSTGRES_PASSWORD=postgres postgres

    fn local_config() -> PostgresConfig {
        PostgresConfig {
            password: "postgres".to_string(),
            ..PostgresConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_sslmode_before_dialing() {
        let config = PostgresConfig {
            sslmode: "bogus".to_string(),
            ..PostgresConfig::default()
        };
        let result = Database::connect(&config).await;
        assert!(matches!(result, Err(ConnectError::Config(_))));
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL running
    async fn test_database_connect_success() {
        let db = Database::connect(&local_config()).await;
        assert!(db.is_ok(), "Should connect to PostgreSQL successfully");
    }

    #[tokio::test]
    #[ignore]
    async fn test_database_connect_wrong_port() {
        let config = PostgresConfig {
            port: 9999,
            acquire_timeout_secs: 1,
            ..local_config()
        };
        let db = Database::connect(&config).await;
        assert!(matches!(db, Err(ConnectError::Database(_))));
    }

    #[tokio::test]
    #[ignore]
    async fn test_database_health_check() {
        let db = Database::connect(&local_config())
            .await
            .expect("Failed to connect");

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check should pass");
    }
}
