//! Confirmed order model for persistence.
//!
//! Maps to the `orders` table; items are stored as a JSON array in one column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: String,
    pub business_id: String,
    pub table_id: String,
    /// JSON array of item-summary lines.
    pub items: String,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(business_id: String, table_id: String, items: &[String]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id,
            table_id,
            items: serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()),
            created_at: Utc::now(),
        }
    }

    /// Decodes the item-summary lines.
    pub fn item_lines(&self) -> Vec<String> {
        serde_json::from_str(&self.items).unwrap_or_default()
    }
}
