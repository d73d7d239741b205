//! # Ledger Store
//!
//! Abstraction mà Transfer Engine dùng để đọc/ghi accounts và
//! transaction records trong một unit of work nguyên tử.
//!
//! ```text
//! LedgerStore::begin() ──► LedgerContext
//!                            ├── account_by_number()
//!                            ├── adjust_balance()
//!                            ├── append_record()
//!                            └── commit() | rollback()
//! ```
//!
//! Context bị drop mà chưa `commit()` thì phải được rollback.

use crate::error::PersistenceResult;
use async_trait::async_trait;
use digibank_core::{Account, TransactionRecord};
use rust_decimal::Decimal;

/// Storage có hỗ trợ transaction cho accounts và ledger records.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    type Context: LedgerContext;

    /// Mở một scoped transactional context.
    ///
    /// Implementation phải đảm bảo hai context cùng chạm một account
    /// không thể cùng đọc một balance cũ (lost update).
    async fn begin(&self) -> PersistenceResult<Self::Context>;
}

/// Unit of work: mọi thay đổi chỉ visible sau `commit()`.
#[async_trait]
pub trait LedgerContext: Send {
    /// Tìm account theo số tài khoản
    async fn account_by_number(&mut self, account_number: &str)
        -> PersistenceResult<Option<Account>>;

    /// Cộng `delta` (có thể âm) vào balance, trả về balance mới.
    /// Fail nếu balance mới < 0.
    async fn adjust_balance(&mut self, account_id: &str, delta: Decimal)
        -> PersistenceResult<Decimal>;

    /// Ghi thêm một transaction record
    async fn append_record(&mut self, record: &TransactionRecord) -> PersistenceResult<()>;

    async fn commit(self) -> PersistenceResult<()>;

    async fn rollback(self) -> PersistenceResult<()>;
}
