//! # Complaint Module
//!
//! Khiếu nại của khách hàng. Không có workflow: mọi complaint được lưu
//! với trạng thái `submitted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Submitted,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(ComplaintStatus::Submitted),
            _ => None,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub user_id: String,
    pub details: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

impl Complaint {
    /// Tạo complaint mới ở trạng thái `submitted`
    pub fn submit(user_id: &str, details: &str) -> Self {
        Self {
            id: crate::new_id(),
            user_id: user_id.to_string(),
            details: details.to_string(),
            status: ComplaintStatus::Submitted,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit() {
        let complaint = Complaint::submit("user-1", "Card was charged twice");
        assert_eq!(complaint.status, ComplaintStatus::Submitted);
        assert_eq!(complaint.user_id, "user-1");
        assert_eq!(ComplaintStatus::from_str("submitted"), Some(complaint.status));
    }
}
