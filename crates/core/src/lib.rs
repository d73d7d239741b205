//! # Digibank Core
//!
//! Domain types dùng chung cho toàn bộ workspace: User, Account,
//! TransactionRecord và Complaint. Không phụ thuộc vào database hay HTTP.

pub mod account;
pub mod complaint;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountSide};
pub use complaint::{Complaint, ComplaintStatus};
pub use transaction::{TransactionRecord, TxKind};
pub use user::User;

/// Sinh ID mới dạng UUID v4 (string)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
