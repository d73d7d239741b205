//! # Digibank Business
//!
//! Business logic layer - Transfer Engine, dashboard and complaint services.

pub mod complaint;
pub mod dashboard;
pub mod error;
pub mod transfer;

pub use complaint::ComplaintService;
pub use dashboard::{Dashboard, DashboardService, DEFAULT_HISTORY_LIMIT};
pub use error::{ComplaintError, DashboardError, TransferError, TransferResult};
pub use transfer::{TransferEngine, TransferPolicy, TransferReceipt};
