//! # Transaction Module
//!
//! TransactionRecord - bản ghi append-only cho mỗi leg của một transfer.
//! Một transfer sinh đúng 2 bản ghi: `debit` trên tài khoản gửi và
//! `credit` trên tài khoản nhận.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Loại leg của giao dịch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Debit,
    Credit,
}

impl TxKind {
    /// Code string cho DB
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Debit => "debit",
            TxKind::Credit => "credit",
        }
    }

    /// Parse từ string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(TxKind::Debit),
            "credit" => Some(TxKind::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bản ghi giao dịch, immutable sau khi tạo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    /// Tài khoản mà leg này tác động
    pub account_id: String,
    pub kind: TxKind,
    /// Luôn dương
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    fn new(account_id: &str, kind: TxKind, amount: Decimal, description: String) -> Self {
        Self {
            id: crate::new_id(),
            account_id: account_id.to_string(),
            kind,
            amount,
            description,
            created_at: Utc::now(),
        }
    }

    /// Leg debit trên tài khoản gửi, mô tả tham chiếu số tài khoản nhận
    pub fn debit(account_id: &str, amount: Decimal, to_account_number: &str) -> Self {
        Self::new(
            account_id,
            TxKind::Debit,
            amount,
            format!("Transfer to {}", to_account_number),
        )
    }

    /// Leg credit trên tài khoản nhận, mô tả tham chiếu số tài khoản gửi
    pub fn credit(account_id: &str, amount: Decimal, from_account_number: &str) -> Self {
        Self::new(
            account_id,
            TxKind::Credit,
            amount,
            format!("Transfer from {}", from_account_number),
        )
    }
}
