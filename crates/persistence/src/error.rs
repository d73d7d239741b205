//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping sqlx errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    // === Ledger errors ===
    #[error("Balance of account {account_id} would become negative: {balance} + ({delta})")]
    NegativeBalance {
        account_id: String,
        balance: Decimal,
        delta: Decimal,
    },

    #[error("Balance of account {account_id} overflows: {balance} + ({delta})")]
    BalanceOverflow {
        account_id: String,
        balance: Decimal,
        delta: Decimal,
    },

    // === Conversion errors ===
    #[error("Invalid decimal value: {0}")]
    InvalidDecimal(String),

    #[error("Invalid enum value: {field} = {value}")]
    InvalidEnumValue { field: String, value: String },
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Tạo NotFound error
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Lỗi tạm thời (lock timeout, pool cạn) - caller có thể retry.
    ///
    /// SQLITE_BUSY = 5, SQLITE_LOCKED = 6; extended codes giữ primary code ở byte thấp.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::PoolTimedOut) => true,
            Self::Database(sqlx::Error::Database(db_err)) => db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| matches!(code & 0xff, 5 | 6))
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_found() {
        let err = PersistenceError::not_found("Account", "1000000001");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Record not found: Account with id 1000000001"
        );
    }

    #[test]
    fn test_negative_balance_display() {
        let err = PersistenceError::NegativeBalance {
            account_id: "acc-a".to_string(),
            balance: dec!(20),
            delta: dec!(-80),
        };
        assert!(err.to_string().contains("acc-a"));
        assert!(err.to_string().contains("-80"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_pool_timeout_is_transient() {
        let err = PersistenceError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_transient());
    }
}
