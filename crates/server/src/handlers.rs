//! API Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use digibank_business::TransferReceipt;
use digibank_core::{Complaint, ComplaintStatus, TransactionRecord, TxKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::CallerId;
use crate::error::ApiError;
use crate::state::AppState;

// ============ Response Types ============

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        })
    }

    pub fn error(code: &str, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code.to_string()),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub receipt: TransferReceipt,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl From<TransactionRecord> for TransactionView {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            amount: record.amount,
            date: record.created_at,
            description: record.description,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub account_number: String,
    pub account_balance: Decimal,
    pub transactions: Vec<TransactionView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
    pub complaint_id: String,
    pub status: ComplaintStatus,
}

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        Self {
            complaint_id: complaint.id,
            status: complaint.status,
        }
    }
}

// ============ Request Types ============

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_account_number: String,
    pub to_account_number: String,
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct SubmitComplaintRequest {
    pub details: String,
}

// ============ Handlers ============

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().timestamp()
    }))
}

/// Transfer funds between two accounts
pub async fn transfer(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let receipt = state
        .transfers
        .transfer(
            &user_id,
            &payload.from_account_number,
            &payload.to_account_number,
            payload.amount,
        )
        .await?;

    Ok(ApiResponse::success(TransferResponse {
        message: "Transfer successful",
        receipt,
    }))
}

/// Primary account and recent transactions of the caller
pub async fn dashboard(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state.dashboard.overview(&user_id).await?;

    Ok(ApiResponse::success(DashboardResponse {
        account_number: dashboard.account.account_number,
        account_balance: dashboard.account.balance,
        transactions: dashboard
            .transactions
            .into_iter()
            .map(TransactionView::from)
            .collect(),
    }))
}

/// Submit a complaint
pub async fn submit_complaint(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    payload: Result<Json<SubmitComplaintRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let complaint = state.complaints.submit(&user_id, &payload.details).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(ComplaintResponse::from(complaint)),
    ))
}

/// Get complaint status
pub async fn get_complaint(
    State(state): State<AppState>,
    CallerId(user_id): CallerId,
    Path(complaint_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let complaint = state.complaints.status(&user_id, &complaint_id).await?;
    Ok(ApiResponse::success(ComplaintResponse::from(complaint)))
}
