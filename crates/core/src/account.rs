//! # Account Module
//!
//! Định nghĩa Account - tài khoản ngân hàng của người dùng.
//! Balance chỉ được thay đổi bởi Transfer Engine (debit/credit).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tài khoản ngân hàng.
///
/// - `id`: định danh nội bộ (UUID), không lộ ra ngoài
/// - `account_number`: số tài khoản hiển thị cho khách hàng, unique
/// - `balance`: số dư, không bao giờ âm sau khi commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// ID nội bộ
    pub id: String,
    /// ID của user sở hữu
    pub user_id: String,
    /// Số tài khoản (external-facing)
    pub account_number: String,
    /// Số dư hiện tại
    pub balance: Decimal,
    /// Thời gian mở tài khoản
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Mở tài khoản mới với số dư ban đầu
    pub fn open(user_id: &str, account_number: &str, balance: Decimal) -> Self {
        Self {
            id: crate::new_id(),
            user_id: user_id.to_string(),
            account_number: account_number.to_string(),
            balance,
            created_at: Utc::now(),
        }
    }

    /// Kiểm tra user có phải chủ tài khoản không
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Kiểm tra số dư có đủ cho `amount` không
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

/// Phía của một giao dịch chuyển tiền: người gửi hay người nhận.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountSide {
    Sender,
    Recipient,
}

impl AccountSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountSide::Sender => "sender",
            AccountSide::Recipient => "recipient",
        }
    }
}

impl fmt::Display for AccountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_account() {
        let account = Account::open("user-1", "1000000001", dec!(500));
        assert_eq!(account.user_id, "user-1");
        assert_eq!(account.account_number, "1000000001");
        assert_eq!(account.balance, dec!(500));
        assert!(!account.id.is_empty());
    }

    #[test]
    fn test_ownership_and_funds() {
        let account = Account::open("user-1", "1000000001", dec!(100));
        assert!(account.is_owned_by("user-1"));
        assert!(!account.is_owned_by("user-2"));
        assert!(account.can_cover(dec!(100)));
        assert!(!account.can_cover(dec!(100.01)));
    }

    #[test]
    fn test_side_display() {
        assert_eq!(AccountSide::Sender.to_string(), "sender");
        assert_eq!(AccountSide::Recipient.to_string(), "recipient");
    }
}
