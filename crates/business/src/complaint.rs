//! Complaint operations - submit and look up

use crate::error::ComplaintError;
use digibank_core::Complaint;
use digibank_persistence::{ComplaintRepo, ComplaintRow, UserRepo};
use sqlx::SqlitePool;

pub struct ComplaintService {
    pool: SqlitePool,
}

impl ComplaintService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new complaint in `submitted` state
    pub async fn submit(&self, user_id: &str, details: &str) -> Result<Complaint, ComplaintError> {
        let details = details.trim();
        if details.is_empty() {
            return Err(ComplaintError::EmptyDetails);
        }

        UserRepo::get_by_id(&self.pool, user_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    ComplaintError::UnknownUser {
                        user_id: user_id.to_string(),
                    }
                } else {
                    ComplaintError::Storage(e)
                }
            })?;

        let complaint = Complaint::submit(user_id, details);
        ComplaintRepo::insert(&self.pool, &ComplaintRow::from(&complaint)).await?;

        tracing::info!(complaint_id = %complaint.id, user_id, "complaint submitted");
        Ok(complaint)
    }

    /// Complaint owned by `user_id`
    pub async fn status(
        &self,
        user_id: &str,
        complaint_id: &str,
    ) -> Result<Complaint, ComplaintError> {
        let row = ComplaintRepo::get_by_id(&self.pool, complaint_id)
            .await?
            .ok_or_else(|| ComplaintError::NotFound {
                complaint_id: complaint_id.to_string(),
            })?;

        if row.user_id != user_id {
            return Err(ComplaintError::Forbidden {
                complaint_id: complaint_id.to_string(),
            });
        }

        Ok(Complaint::try_from(row)?)
    }
}
