//! Transcript repository: bounded persistence for conversation turns.
//!
//! One row per turn, keyed by (business, table). The transcript is trimmed to the
//! window bound on every append so the persisted log and the in-memory window
//! agree after a reload. External: SQLite via sqlx.

use dinebot_core::{SessionKey, Turn};
use tracing::{debug, info};

use crate::models::{sender_str, TurnRecord};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct TranscriptRepository {
    pool_manager: SqlitePoolManager,
}

impl TranscriptRepository {
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transcript_turns (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                business_id TEXT NOT NULL,
                table_id TEXT NOT NULL,
                sender TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transcript_session
                ON transcript_turns(business_id, table_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Appends one turn and trims the session's transcript to the most recent
    /// `keep` rows. Interactive content is stored as the fixed placeholder.
    pub async fn append(
        &self,
        key: &SessionKey,
        turn: &Turn,
        keep: i64,
    ) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO transcript_turns (id, business_id, table_id, sender, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.id)
        .bind(&key.business_id)
        .bind(&key.table_id)
        .bind(sender_str(turn.sender))
        .bind(turn.content.as_context_str())
        .bind(turn.created_at)
        .execute(pool)
        .await?;

        let trimmed = sqlx::query(
            r#"
            DELETE FROM transcript_turns
            WHERE business_id = ? AND table_id = ?
              AND seq NOT IN (
                SELECT seq FROM transcript_turns
                WHERE business_id = ? AND table_id = ?
                ORDER BY seq DESC LIMIT ?
              )
            "#,
        )
        .bind(&key.business_id)
        .bind(&key.table_id)
        .bind(&key.business_id)
        .bind(&key.table_id)
        .bind(keep)
        .execute(pool)
        .await?;

        info!(
            turn_id = %turn.id,
            table_id = %key.table_id,
            trimmed = trimmed.rows_affected(),
            "Appended transcript turn"
        );
        Ok(())
    }

    /// Loads the session's transcript in insertion order.
    pub async fn load(&self, key: &SessionKey) -> Result<Vec<TurnRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let records: Vec<TurnRecord> = sqlx::query_as::<_, TurnRecord>(
            r#"
            SELECT seq, id, business_id, table_id, sender, content, created_at
            FROM transcript_turns
            WHERE business_id = ? AND table_id = ?
            ORDER BY seq ASC
            "#,
        )
        .bind(&key.business_id)
        .bind(&key.table_id)
        .fetch_all(pool)
        .await?;

        debug!(
            table_id = %key.table_id,
            count = records.len(),
            "Loaded transcript"
        );
        Ok(records)
    }

    /// Deletes the session's transcript. Order history is untouched.
    pub async fn clear(&self, key: &SessionKey) -> Result<u64, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            "DELETE FROM transcript_turns WHERE business_id = ? AND table_id = ?",
        )
        .bind(&key.business_id)
        .bind(&key.table_id)
        .execute(pool)
        .await?;

        info!(
            table_id = %key.table_id,
            deleted = result.rows_affected(),
            "Cleared transcript"
        );
        Ok(result.rows_affected())
    }
}
