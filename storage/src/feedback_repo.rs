//! Feedback repository and the [`FeedbackSink`] adapter.
//!
//! External: SQLite via sqlx.

use async_trait::async_trait;
use dinebot_core::{DinebotError, FeedbackSink, FeedbackSubmission};
use tracing::info;

use crate::models::FeedbackRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct FeedbackRepository {
    pool_manager: SqlitePoolManager,
}

impl FeedbackRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                business_id TEXT NOT NULL,
                table_id TEXT NOT NULL,
                target TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT,
                image_url TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Persists one completed submission and returns the stored record.
    pub async fn save(
        &self,
        business_id: &str,
        table_id: &str,
        submission: &FeedbackSubmission,
    ) -> Result<FeedbackRecord, sqlx::Error> {
        let pool = self.pool_manager.pool();
        let record = FeedbackRecord::from_submission(
            business_id.to_string(),
            table_id.to_string(),
            submission,
        );

        sqlx::query(
            r#"
            INSERT INTO feedback (id, business_id, table_id, target, rating, comment, image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.business_id)
        .bind(&record.table_id)
        .bind(&record.target)
        .bind(record.rating)
        .bind(&record.comment)
        .bind(&record.image_url)
        .bind(record.created_at)
        .execute(pool)
        .await?;

        info!(
            feedback_id = %record.id,
            rating = record.rating,
            "Saved feedback"
        );
        Ok(record)
    }

    /// Lists feedback for a business, oldest first.
    pub async fn list_for_business(
        &self,
        business_id: &str,
    ) -> Result<Vec<FeedbackRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query_as::<_, FeedbackRecord>(
            r#"
            SELECT id, business_id, table_id, target, rating, comment, image_url, created_at
            FROM feedback
            WHERE business_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(pool)
        .await
    }
}

#[async_trait]
impl FeedbackSink for FeedbackRepository {
    async fn submit(
        &self,
        business_id: &str,
        feedback: &FeedbackSubmission,
        table_id: &str,
    ) -> dinebot_core::Result<()> {
        self.save(business_id, table_id, feedback)
            .await
            .map(|_| ())
            .map_err(|e| DinebotError::Storage(e.to_string()))
    }
}
