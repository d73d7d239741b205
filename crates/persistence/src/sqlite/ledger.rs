//! SQLite implementation của Ledger Store
//!
//! Mỗi context mở bằng `BEGIN IMMEDIATE`: write lock của database được lấy
//! ngay từ đầu, trước lần đọc balance đầu tiên. Hai transfer đồng thời vì
//! vậy được serialize, transfer sau luôn đọc balance đã commit của transfer
//! trước. Chỉ có một lock duy nhất nên không thể có deadlock do thứ tự lock.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::repos::{AccountRepo, TransactionRepo};
use crate::sqlite::schema::{parse_decimal, TransactionRow};
use crate::store::{LedgerContext, LedgerStore};
use async_trait::async_trait;
use digibank_core::{Account, TransactionRecord};
use rust_decimal::Decimal;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Ledger Store trên một `SqlitePool` được inject từ ngoài vào
#[derive(Debug, Clone)]
pub struct SqliteLedgerStore {
    pool: SqlitePool,
}

impl SqliteLedgerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl LedgerStore for SqliteLedgerStore {
    type Context = SqliteLedgerContext;

    async fn begin(&self) -> PersistenceResult<Self::Context> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(SqliteLedgerContext { tx })
    }
}

/// Context bọc `sqlx::Transaction`; drop mà chưa commit thì sqlx tự rollback.
pub struct SqliteLedgerContext {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl LedgerContext for SqliteLedgerContext {
    async fn account_by_number(
        &mut self,
        account_number: &str,
    ) -> PersistenceResult<Option<Account>> {
        AccountRepo::get_by_number(&mut *self.tx, account_number)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn adjust_balance(
        &mut self,
        account_id: &str,
        delta: Decimal,
    ) -> PersistenceResult<Decimal> {
        let row = AccountRepo::get_by_id(&mut *self.tx, account_id).await?;
        let balance = parse_decimal(&row.balance)?;

        let new_balance =
            balance
                .checked_add(delta)
                .ok_or_else(|| PersistenceError::BalanceOverflow {
                    account_id: account_id.to_string(),
                    balance,
                    delta,
                })?;
        if new_balance < Decimal::ZERO {
            return Err(PersistenceError::NegativeBalance {
                account_id: account_id.to_string(),
                balance,
                delta,
            });
        }

        AccountRepo::update_balance(&mut *self.tx, account_id, new_balance).await?;
        Ok(new_balance)
    }

    async fn append_record(&mut self, record: &TransactionRecord) -> PersistenceResult<()> {
        TransactionRepo::insert(&mut *self.tx, &TransactionRow::from(record)).await
    }

    async fn commit(self) -> PersistenceResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> PersistenceResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
