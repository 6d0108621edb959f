//! Data models for the account table

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};

/// Column widths of the account table (`VARCHAR(n)`, counted in characters)
pub const NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_HASH_MAX_CHARS: usize = 255;

/// Stored account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    #[serde(skip_serializing, default)]
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Account fields supplied by the caller; storage assigns `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Build a fresh account: hashed password, random number, zero balance
    pub fn new(first_name: &str, last_name: &str, password: &str) -> StorageResult<Self> {
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            number: generate_account_number(),
            encrypted_password: hash_password(password)?,
            balance: 0,
            created_at: Utc::now(),
        })
    }
}

impl Account {
    pub fn from_new(id: i32, new: NewAccount) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            number: new.number,
            encrypted_password: new.encrypted_password,
            balance: new.balance,
            created_at: new.created_at,
        }
    }

    /// Check a candidate password against the stored hash.
    /// A malformed stored hash never verifies.
    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.encrypted_password) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Random positive account number over the whole `i64` range, so
/// collisions stay negligible however many accounts are stored
pub fn generate_account_number() -> i64 {
    rand::thread_rng().gen_range(1..=i64::MAX)
}

/// Reject values wider than the account table's text columns
pub(crate) fn check_column_widths(
    first_name: &str,
    last_name: &str,
    encrypted_password: &str,
) -> StorageResult<()> {
    let columns = [
        ("first_name", first_name, NAME_MAX_CHARS),
        ("last_name", last_name, NAME_MAX_CHARS),
        ("encrypted_password", encrypted_password, PASSWORD_HASH_MAX_CHARS),
    ];
    for (field, value, max) in columns {
        let actual = value.chars().count();
        if actual > max {
            return Err(StorageError::FieldTooLong { field, max, actual });
        }
    }
    Ok(())
}

/// Hash a plaintext password into an Argon2 PHC string
pub fn hash_password(password: &str) -> StorageResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StorageError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let acc = NewAccount::new("Ada", "Lovelace", "s3cret").unwrap();
        assert_eq!(acc.first_name, "Ada");
        assert_eq!(acc.last_name, "Lovelace");
        assert_eq!(acc.balance, 0);
        assert!(acc.number > 0);
        assert_ne!(acc.encrypted_password, "s3cret");
        assert!(acc.encrypted_password.starts_with("$argon2"));
    }

    #[test]
    fn test_generated_numbers_do_not_collide() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            let number = generate_account_number();
            assert!(number > 0);
            assert!(seen.insert(number), "duplicate account number {}", number);
        }
    }

    #[test]
    fn test_argon2_hash_fits_password_column() {
        let hash = hash_password("a much longer passphrase than usual").unwrap();
        assert!(hash.chars().count() <= PASSWORD_HASH_MAX_CHARS);
    }

    #[test]
    fn test_check_column_widths() {
        assert!(check_column_widths("Ada", "Lovelace", "hash").is_ok());

        let exact = "a".repeat(NAME_MAX_CHARS);
        assert!(check_column_widths(&exact, &exact, "hash").is_ok());

        // multi-byte characters count once, like VARCHAR(n)
        let accents = "é".repeat(NAME_MAX_CHARS);
        assert!(check_column_widths(&accents, "x", "hash").is_ok());

        let long = "a".repeat(NAME_MAX_CHARS + 1);
        let err = check_column_widths("Ada", &long, "hash").unwrap_err();
        assert!(matches!(
            err,
            StorageError::FieldTooLong { field: "last_name", max: 100, actual: 101 }
        ));

        let long_hash = "h".repeat(PASSWORD_HASH_MAX_CHARS + 1);
        let err = check_column_widths("Ada", "Lovelace", &long_hash).unwrap_err();
        assert!(matches!(
            err,
            StorageError::FieldTooLong { field: "encrypted_password", .. }
        ));
    }

    #[test]
    fn test_verify_password() {
        let acc = Account::from_new(1, NewAccount::new("Ada", "Lovelace", "s3cret").unwrap());
        assert!(acc.verify_password("s3cret"));
        assert!(!acc.verify_password("wrong"));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let mut acc = Account::from_new(1, NewAccount::new("Ada", "Lovelace", "x").unwrap());
        acc.encrypted_password = "not-a-hash".to_string();
        assert!(!acc.verify_password("x"));
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let new = NewAccount::new("Grace", "Hopper", "cobol").unwrap();
        let acc = Account::from_new(7, new.clone());
        assert_eq!(acc.id, 7);
        assert_eq!(acc.number, new.number);
        assert_eq!(acc.created_at, new.created_at);
        assert_eq!(acc.encrypted_password, new.encrypted_password);
    }

    #[test]
    fn test_serialize_hides_password() {
        let acc = Account::from_new(3, NewAccount::new("Alan", "Turing", "enigma").unwrap());
        let json = serde_json::to_string(&acc).unwrap();
        assert!(json.contains("\"first_name\":\"Alan\""));
        assert!(!json.contains("encrypted_password"));
    }
}
