//! SQLite persistence module
//!
//! Repository pattern cho SQLite database access, cộng với Ledger Store
//! implementation dùng cho Transfer Engine.

pub mod ledger;
pub mod repos;
pub mod schema;

pub use ledger::{SqliteLedgerContext, SqliteLedgerStore};
pub use repos::{
    create_pool, init_database, run_migrations, AccountRepo, ComplaintRepo, PoolSettings,
    TransactionRepo, UserRepo,
};
pub use schema::{AccountRow, ComplaintRow, TransactionRow, UserRow};
