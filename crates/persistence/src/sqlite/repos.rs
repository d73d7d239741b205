//! Repository implementations cho SQLite
//!
//! Các hàm nhận một `Executor` bất kỳ (`&SqlitePool` hoặc `&mut SqliteConnection`
//! bên trong transaction) để dùng chung cho cả đọc thường và ledger context.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// User Repository
// ============================================================================

/// Repository cho users table
pub struct UserRepo;

impl UserRepo {
    /// Thêm user mới
    pub async fn insert<'c, E>(executor: E, user: &UserRow) -> PersistenceResult<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO users (id, email, created_at) VALUES (?, ?, ?)")
            .bind(&user.id)
            .bind(&user.email)
            .bind(user.created_at)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Lấy user theo ID
    pub async fn get_by_id<'c, E>(executor: E, id: &str) -> PersistenceResult<UserRow>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("User", id))
    }
}

// ============================================================================
// Account Repository
// ============================================================================

/// Repository cho accounts table
pub struct AccountRepo;

impl AccountRepo {
    /// Thêm account mới
    pub async fn insert<'c, E>(executor: E, account: &AccountRow) -> PersistenceResult<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO accounts (id, user_id, account_number, balance, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.user_id)
        .bind(&account.account_number)
        .bind(&account.balance)
        .bind(account.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Lấy account theo ID
    pub async fn get_by_id<'c, E>(executor: E, id: &str) -> PersistenceResult<AccountRow>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Account", id))
    }

    /// Lấy account theo số tài khoản
    pub async fn get_by_number<'c, E>(
        executor: E,
        account_number: &str,
    ) -> PersistenceResult<Option<AccountRow>>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE account_number = ?",
        )
        .bind(account_number)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    /// Lấy tất cả accounts của user, account mở sớm nhất đứng đầu
    pub async fn get_by_user<'c, E>(executor: E, user_id: &str) -> PersistenceResult<Vec<AccountRow>>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE user_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Ghi đè balance
    pub async fn update_balance<'c, E>(
        executor: E,
        id: &str,
        balance: Decimal,
    ) -> PersistenceResult<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE accounts SET balance = ? WHERE id = ?")
            .bind(balance.to_string())
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Account", id));
        }
        Ok(())
    }
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Repository cho transactions table (append-only)
pub struct TransactionRepo;

impl TransactionRepo {
    /// Thêm transaction mới
    pub async fn insert<'c, E>(executor: E, tx: &TransactionRow) -> PersistenceResult<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, account_id, tx_type, amount, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.account_id)
        .bind(&tx.tx_type)
        .bind(&tx.amount)
        .bind(&tx.description)
        .bind(tx.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Lấy transactions theo account, mới nhất trước
    pub async fn get_by_account<'c, E>(
        executor: E,
        account_id: &str,
    ) -> PersistenceResult<Vec<TransactionRow>>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(account_id)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Lấy `limit` transactions gần nhất của account
    pub async fn recent_by_account<'c, E>(
        executor: E,
        account_id: &str,
        limit: u32,
    ) -> PersistenceResult<Vec<TransactionRow>>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE account_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
        )
        .bind(account_id)
        .bind(i64::from(limit))
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Đếm transactions
    pub async fn count<'c, E>(executor: E) -> PersistenceResult<i64>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Complaint Repository
// ============================================================================

/// Repository cho complaints table
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Thêm complaint mới
    pub async fn insert<'c, E>(executor: E, complaint: &ComplaintRow) -> PersistenceResult<()>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT INTO complaints (id, user_id, details, status, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&complaint.id)
        .bind(&complaint.user_id)
        .bind(&complaint.details)
        .bind(&complaint.status)
        .bind(complaint.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Lấy complaint theo ID
    pub async fn get_by_id<'c, E>(executor: E, id: &str) -> PersistenceResult<Option<ComplaintRow>>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, ComplaintRow>("SELECT * FROM complaints WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// Tham số cho connection pool
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Thời gian chờ tối đa khi database đang bị lock bởi writer khác
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Khởi tạo database connection pool
pub async fn create_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(settings.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Chạy migrations
pub async fn run_migrations(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Tạo database mới với schema
pub async fn init_database(
    database_url: &str,
    settings: &PoolSettings,
) -> PersistenceResult<SqlitePool> {
    let pool = create_pool(database_url, settings).await?;

    // Run migrations
    run_migrations(&pool).await?;

    Ok(pool)
}
