//! Application state

use digibank_business::{ComplaintService, DashboardService, TransferEngine};
use digibank_persistence::{Database, SqliteLedgerStore};
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub transfers: Arc<TransferEngine<SqliteLedgerStore>>,
    pub dashboard: Arc<DashboardService>,
    pub complaints: Arc<ComplaintService>,
}

impl AppState {
    pub fn new(db: &Database, config: &AppConfig) -> Self {
        let engine = TransferEngine::new(db.ledger()).with_policy(config.transfer_policy());
        let dashboard = DashboardService::new(db.pool().clone())
            .with_history_limit(config.dashboard_history_limit);

        Self {
            transfers: Arc::new(engine),
            dashboard: Arc::new(dashboard),
            complaints: Arc::new(ComplaintService::new(db.pool().clone())),
        }
    }
}
