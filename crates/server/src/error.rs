//! API errors and their HTTP status mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use digibank_business::{ComplaintError, DashboardError, TransferError};
use thiserror::Error;

use crate::handlers::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing caller identity")]
    MissingIdentity,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    Complaint(#[from] ComplaintError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingIdentity => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Transfer(err) => match err {
                TransferError::InvalidAmount { .. }
                | TransferError::InvalidTransfer { .. }
                | TransferError::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
                TransferError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                TransferError::AccountNotFound { .. } => StatusCode::NOT_FOUND,
                TransferError::TransferFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Dashboard(err) => match err {
                DashboardError::NoAccount { .. } => StatusCode::NOT_FOUND,
                DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Complaint(err) => match err {
                ComplaintError::EmptyDetails => StatusCode::BAD_REQUEST,
                ComplaintError::UnknownUser { .. } => StatusCode::UNAUTHORIZED,
                ComplaintError::NotFound { .. } => StatusCode::NOT_FOUND,
                ComplaintError::Forbidden { .. } => StatusCode::FORBIDDEN,
                ComplaintError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Machine-readable code in the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingIdentity => "MissingIdentity",
            ApiError::InvalidBody(_) => "InvalidRequest",
            ApiError::Transfer(err) => err.kind(),
            ApiError::Dashboard(DashboardError::NoAccount { .. }) => "NoAccount",
            ApiError::Complaint(ComplaintError::EmptyDetails) => "EmptyDetails",
            ApiError::Complaint(ComplaintError::UnknownUser { .. }) => "UnknownUser",
            ApiError::Complaint(ComplaintError::NotFound { .. }) => "NotFound",
            ApiError::Complaint(ComplaintError::Forbidden { .. }) => "Forbidden",
            ApiError::Dashboard(DashboardError::Storage(_))
            | ApiError::Complaint(ComplaintError::Storage(_)) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the logs
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            match &self {
                ApiError::Transfer(_) => "Transaction failed".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        (status, ApiResponse::<()>::error(self.code(), message)).into_response()
    }
}
