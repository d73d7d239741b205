//! Business layer errors
//!
//! Typed error enums per service. Each variant carries the identifiers and
//! amounts involved so the HTTP layer can map them without parsing text.

use digibank_core::AccountSide;
use digibank_persistence::PersistenceError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Transfer Engine errors
#[derive(Debug, Error)]
pub enum TransferError {
    // === Validation errors (no mutation performed) ===
    #[error("Invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount { amount: Decimal },

    #[error("Invalid transfer: account {account_number} cannot transfer to itself")]
    InvalidTransfer { account_number: String },

    #[error("{side} account not found: {account_number}")]
    AccountNotFound {
        side: AccountSide,
        account_number: String,
    },

    #[error("User {user_id} is not authorized to transfer from account {account_number}")]
    Unauthorized {
        user_id: String,
        account_number: String,
    },

    #[error("Insufficient funds in account {account_number}: requested {requested}, available {available}")]
    InsufficientFunds {
        account_number: String,
        requested: Decimal,
        available: Decimal,
    },

    // === Storage errors (context rolled back) ===
    #[error("Transfer failed: {source}")]
    TransferFailed {
        #[from]
        source: PersistenceError,
    },
}

/// Result type alias for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

impl TransferError {
    /// Create account not found error
    pub fn account_not_found(side: AccountSide, account_number: &str) -> Self {
        Self::AccountNotFound {
            side,
            account_number: account_number.to_string(),
        }
    }

    /// Short machine-readable kind, used in logs and API responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "InvalidAmount",
            Self::InvalidTransfer { .. } => "InvalidTransfer",
            Self::AccountNotFound { .. } => "AccountNotFound",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::InsufficientFunds { .. } => "InsufficientFunds",
            Self::TransferFailed { .. } => "TransferFailed",
        }
    }

    /// Storage failure that may succeed on retry (lock timeout, pool exhausted)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::TransferFailed { source } => source.is_transient(),
            _ => false,
        }
    }
}

/// Dashboard errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No account found for user {user_id}")]
    NoAccount { user_id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),
}

/// Complaint errors
#[derive(Debug, Error)]
pub enum ComplaintError {
    #[error("Complaint details are required")]
    EmptyDetails,

    #[error("Unknown user: {user_id}")]
    UnknownUser { user_id: String },

    #[error("Complaint not found: {complaint_id}")]
    NotFound { complaint_id: String },

    #[error("Not allowed to access complaint {complaint_id}")]
    Forbidden { complaint_id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),
}
