//! # Digibank Persistence
//!
//! Persistence layer cho Digibank - SQLite qua sqlx.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Database                               │
//! │  ┌─────────────────────┐        ┌────────────────────────┐ │
//! │  │  SqliteLedgerStore  │        │         Repos          │ │
//! │  │ (atomic transfers)  │        │ (dashboard, complaints)│ │
//! │  └─────────────────────┘        └────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use digibank_persistence::{Database, PoolSettings, LedgerStore};
//!
//! let db = Database::connect("sqlite:digibank.db", &PoolSettings::default()).await?;
//!
//! // Query via repos
//! let accounts = AccountRepo::get_by_user(db.pool(), "user-1").await?;
//!
//! // Atomic unit of work
//! let mut ctx = db.ledger().begin().await?;
//! ```

pub mod error;
pub mod sqlite;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::schema::{AccountRow, ComplaintRow, TransactionRow, UserRow};
pub use sqlite::{
    init_database, AccountRepo, ComplaintRepo, PoolSettings, SqliteLedgerContext,
    SqliteLedgerStore, TransactionRepo, UserRepo,
};
pub use store::{LedgerContext, LedgerStore};

use sqlx::SqlitePool;

/// Database facade - pool dùng chung cho repos và ledger store
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Kết nối và chạy migrations
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:digibank.db")
    /// * `settings` - pool size và busy timeout
    pub async fn connect(db_url: &str, settings: &PoolSettings) -> PersistenceResult<Self> {
        let pool = init_database(db_url, settings).await?;
        tracing::info!(url = db_url, "database ready");
        Ok(Self { pool })
    }

    /// Get SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ledger Store trên cùng pool
    pub fn ledger(&self) -> SqliteLedgerStore {
        SqliteLedgerStore::new(self.pool.clone())
    }
}
