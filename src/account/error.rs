//! Storage error types

use std::fmt;
use thiserror::Error;

/// Key used for a single-row lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKey {
    Id(i32),
    Number(i64),
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKey::Id(id) => write!(f, "id={}", id),
            AccountKey::Number(number) => write!(f, "number={}", number),
        }
    }
}

/// Account storage errors
///
/// Driver failures pass through untouched in `Database`; callers interpret
/// them directly.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Account not found: {0}")]
    NotFound(AccountKey),

    #[error("Account number already in use: {0}")]
    DuplicateNumber(i64),

    /// In-memory store only; PostgreSQL reports an oversized value as a
    /// driver error from its `VARCHAR(n)` column
    #[error("Field {field} too long: {actual} characters (max {max})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::NotFound(AccountKey::Id(42));
        assert_eq!(err.to_string(), "Account not found: id=42");
        assert!(err.is_not_found());

        let err = StorageError::NotFound(AccountKey::Number(123456));
        assert_eq!(err.to_string(), "Account not found: number=123456");
    }

    #[test]
    fn test_driver_error_passes_through() {
        let err: StorageError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StorageError::Database(sqlx::Error::RowNotFound)));
        assert!(!err.is_not_found());
    }
}
