//! Database schema definitions
//!
//! Row types cho sqlx mapping từ SQLite tables.
//! Schema được định nghĩa trong migrations/20260301000000_init.sql

use crate::error::{PersistenceError, PersistenceResult};
use chrono::{DateTime, Utc};
use digibank_core::{Account, Complaint, ComplaintStatus, TransactionRecord, TxKind, User};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Row type cho bảng `users`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Row type cho bảng `accounts`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    pub user_id: String,
    pub account_number: String,
    pub balance: String, // Decimal stored as TEXT
    pub created_at: DateTime<Utc>,
}

/// Row type cho bảng `transactions`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub account_id: String,
    pub tx_type: String,
    pub amount: String, // Decimal stored as TEXT
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Row type cho bảng `complaints`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ComplaintRow {
    pub id: String,
    pub user_id: String,
    pub details: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub(crate) fn parse_decimal(value: &str) -> PersistenceResult<Decimal> {
    Decimal::from_str(value).map_err(|e| PersistenceError::InvalidDecimal(format!("{value}: {e}")))
}

// === Conversion implementations ===

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            user_id: account.user_id.clone(),
            account_number: account.account_number.clone(),
            balance: account.balance.to_string(),
            created_at: account.created_at,
        }
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> PersistenceResult<Self> {
        Ok(Self {
            balance: parse_decimal(&row.balance)?,
            id: row.id,
            user_id: row.user_id,
            account_number: row.account_number,
            created_at: row.created_at,
        })
    }
}

impl From<&TransactionRecord> for TransactionRow {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: record.id.clone(),
            account_id: record.account_id.clone(),
            tx_type: record.kind.as_str().to_string(),
            amount: record.amount.to_string(),
            description: record.description.clone(),
            created_at: record.created_at,
        }
    }
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = PersistenceError;

    fn try_from(row: TransactionRow) -> PersistenceResult<Self> {
        let kind = TxKind::from_str(&row.tx_type).ok_or_else(|| {
            PersistenceError::InvalidEnumValue {
                field: "tx_type".to_string(),
                value: row.tx_type.clone(),
            }
        })?;

        Ok(Self {
            amount: parse_decimal(&row.amount)?,
            id: row.id,
            account_id: row.account_id,
            kind,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

impl From<&Complaint> for ComplaintRow {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id.clone(),
            user_id: complaint.user_id.clone(),
            details: complaint.details.clone(),
            status: complaint.status.as_str().to_string(),
            created_at: complaint.created_at,
        }
    }
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = PersistenceError;

    fn try_from(row: ComplaintRow) -> PersistenceResult<Self> {
        let status = ComplaintStatus::from_str(&row.status).ok_or_else(|| {
            PersistenceError::InvalidEnumValue {
                field: "status".to_string(),
                value: row.status.clone(),
            }
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            details: row.details,
            status,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_row_roundtrip() {
        let account = Account::open("user-1", "1000000001", dec!(123.45));
        let row = AccountRow::from(&account);
        assert_eq!(row.balance, "123.45");
        assert_eq!(Account::try_from(row).unwrap(), account);
    }

    #[test]
    fn test_invalid_decimal_rejected() {
        let row = AccountRow {
            id: "acc".to_string(),
            user_id: "user".to_string(),
            account_number: "1".to_string(),
            balance: "abc".to_string(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            Account::try_from(row),
            Err(PersistenceError::InvalidDecimal(_))
        ));
    }

    #[test]
    fn test_invalid_tx_type_rejected() {
        let mut row = TransactionRow::from(&TransactionRecord::debit("acc", dec!(1), "2"));
        row.tx_type = "refund".to_string();
        assert!(matches!(
            TransactionRecord::try_from(row),
            Err(PersistenceError::InvalidEnumValue { .. })
        ));
    }
}
