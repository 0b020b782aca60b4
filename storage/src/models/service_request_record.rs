//! Service/task request model for persistence.
//!
//! Maps to the `service_requests` table; written when an order is confirmed or a
//! waiter is called for a table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) const STATUS_OPEN: &str = "open";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceRequestRecord {
    pub id: String,
    pub table_id: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl ServiceRequestRecord {
    /// Creates an open request with a generated UUID and current timestamp.
    pub fn new(table_id: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            table_id,
            description,
            status: STATUS_OPEN.to_string(),
            created_at: Utc::now(),
        }
    }
}
