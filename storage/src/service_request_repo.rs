//! Service request repository and the [`TaskDispatcher`] adapter.
//!
//! Confirmed orders and call-waiter requests land here as open tickets for staff.
//! External: SQLite via sqlx.

use async_trait::async_trait;
use dinebot_core::{DinebotError, TaskDispatcher};
use tracing::info;

use crate::models::ServiceRequestRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ServiceRequestRepository {
    pool_manager: SqlitePoolManager,
}

impl ServiceRequestRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS service_requests (
                id TEXT PRIMARY KEY,
                table_id TEXT NOT NULL,
                description TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Creates an open request ticket and returns it.
    pub async fn create(
        &self,
        table_id: &str,
        description: &str,
    ) -> Result<ServiceRequestRecord, sqlx::Error> {
        let pool = self.pool_manager.pool();
        let record = ServiceRequestRecord::new(table_id.to_string(), description.to_string());

        sqlx::query(
            r#"
            INSERT INTO service_requests (id, table_id, description, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.table_id)
        .bind(&record.description)
        .bind(&record.status)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(
            request_id = %record.id,
            table_id = %table_id,
            "Created service request"
        );
        Ok(record)
    }

    /// Lists requests for one table, oldest first.
    pub async fn list_for_table(
        &self,
        table_id: &str,
    ) -> Result<Vec<ServiceRequestRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query_as::<_, ServiceRequestRecord>(
            r#"
            SELECT id, table_id, description, status, created_at
            FROM service_requests
            WHERE table_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(table_id)
        .fetch_all(pool)
        .await
    }
}

#[async_trait]
impl TaskDispatcher for ServiceRequestRepository {
    async fn submit(&self, table_id: &str, description: &str) -> dinebot_core::Result<()> {
        self.create(table_id, description)
            .await
            .map(|_| ())
            .map_err(|e| DinebotError::Dispatch(e.to_string()))
    }
}
