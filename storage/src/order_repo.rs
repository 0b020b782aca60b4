//! Order history repository: append-only log of confirmed orders per session.
//!
//! Entries are never mutated or deleted by the orchestrator; retention is an
//! external concern. External: SQLite via sqlx.

use dinebot_core::SessionKey;
use tracing::{debug, info};

use crate::models::OrderRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct OrderHistoryRepository {
    pool_manager: SqlitePoolManager,
}

impl OrderHistoryRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                business_id TEXT NOT NULL,
                table_id TEXT NOT NULL,
                items TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_orders_session ON orders(business_id, table_id);",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Appends one confirmed order and returns the stored record.
    pub async fn append(
        &self,
        key: &SessionKey,
        items: &[String],
    ) -> Result<OrderRecord, sqlx::Error> {
        let pool = self.pool_manager.pool();
        let record = OrderRecord::new(key.business_id.clone(), key.table_id.clone(), items);

        sqlx::query(
            r#"
            INSERT INTO orders (id, business_id, table_id, items, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.business_id)
        .bind(&record.table_id)
        .bind(&record.items)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(
            order_id = %record.id,
            table_id = %key.table_id,
            items = items.len(),
            "Appended confirmed order"
        );
        Ok(record)
    }

    /// Lists the session's confirmed orders, oldest first.
    pub async fn list(&self, key: &SessionKey) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let records: Vec<OrderRecord> = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, business_id, table_id, items, created_at
            FROM orders
            WHERE business_id = ? AND table_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(&key.business_id)
        .bind(&key.table_id)
        .fetch_all(pool)
        .await?;

        debug!(table_id = %key.table_id, count = records.len(), "Loaded order history");
        Ok(records)
    }
}
