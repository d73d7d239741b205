//! # User Module
//!
//! Chủ sở hữu của Account và Complaint. Đăng ký / đăng nhập nằm ngoài
//! phạm vi, nên User chỉ giữ các trường tối thiểu.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Tạo User mới với ID ngẫu nhiên
    pub fn new(email: &str) -> Self {
        Self {
            id: crate::new_id(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }
}
