//! Persisted form of a conversation turn.
//!
//! Maps to the `transcript_turns` table. Interactive content is stored as the
//! fixed placeholder string, never as serialized UI state.

use chrono::{DateTime, Utc};
use dinebot_core::{Turn, TurnContent, TurnSender, INTERACTIVE_PLACEHOLDER};
use serde::{Deserialize, Serialize};

pub(crate) const SENDER_USER: &str = "user";
pub(crate) const SENDER_ASSISTANT: &str = "assistant";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TurnRecord {
    pub id: String,
    pub business_id: String,
    pub table_id: String,
    /// Monotonic insertion order; distinguishes turns created in the same millisecond.
    pub seq: i64,
    pub sender: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    /// Rehydrates the core [`Turn`]. The placeholder string maps back to
    /// interactive content; unknown sender strings default to assistant.
    pub fn into_turn(self) -> Turn {
        let sender = match self.sender.as_str() {
            SENDER_USER => TurnSender::User,
            _ => TurnSender::Assistant,
        };
        let content = if self.content == INTERACTIVE_PLACEHOLDER {
            TurnContent::Interactive
        } else {
            TurnContent::Text(self.content)
        };
        Turn {
            id: self.id,
            sender,
            content,
            created_at: self.created_at,
        }
    }
}

pub(crate) fn sender_str(sender: TurnSender) -> &'static str {
    match sender {
        TurnSender::User => SENDER_USER,
        TurnSender::Assistant => SENDER_ASSISTANT,
    }
}
