//! Guest feedback model for persistence.
//!
//! Maps to the `feedback` table.

use chrono::{DateTime, Utc};
use dinebot_core::FeedbackSubmission;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedbackRecord {
    pub id: String,
    pub business_id: String,
    pub table_id: String,
    pub target: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Creates a record from a completed submission with a generated UUID.
    pub fn from_submission(
        business_id: String,
        table_id: String,
        submission: &FeedbackSubmission,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id,
            table_id,
            target: submission.target.clone(),
            rating: i64::from(submission.rating),
            comment: submission.comment.clone(),
            image_url: submission.image_url.clone(),
            created_at: Utc::now(),
        }
    }
}
