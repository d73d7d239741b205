//! Dashboard - primary account overview with recent history

use crate::error::DashboardError;
use digibank_core::{Account, TransactionRecord};
use digibank_persistence::{AccountRepo, TransactionRepo};
use sqlx::SqlitePool;

/// Number of records shown when not configured
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Snapshot of the user's primary account
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub account: Account,
    /// Newest first
    pub transactions: Vec<TransactionRecord>,
}

/// Read-only dashboard queries
pub struct DashboardService {
    pool: SqlitePool,
    history_limit: u32,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    /// Primary account (earliest opened) and its latest transactions
    pub async fn overview(&self, user_id: &str) -> Result<Dashboard, DashboardError> {
        let row = AccountRepo::get_by_user(&self.pool, user_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::NoAccount {
                user_id: user_id.to_string(),
            })?;
        let account = Account::try_from(row)?;

        let transactions =
            TransactionRepo::recent_by_account(&self.pool, &account.id, self.history_limit)
                .await?
                .into_iter()
                .map(TransactionRecord::try_from)
                .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(user_id, records = transactions.len(), "dashboard loaded");

        Ok(Dashboard {
            account,
            transactions,
        })
    }
}
