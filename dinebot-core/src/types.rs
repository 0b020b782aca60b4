//! Core types: session identity, conversation turns, and the read-only domain snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored in place of interactive content. Persisted transcripts and the
/// backend context window both use this string; the composed UI fragment itself is
/// never serialized.
pub const INTERACTIVE_PLACEHOLDER: &str = "[interactive content]";

/// Scope of one conversation: a (business, table) pairing. Transcript and order
/// history are persisted per key and are independently clearable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub business_id: String,
    pub table_id: String,
}

impl SessionKey {
    pub fn new(business_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            business_id: business_id.into(),
            table_id: table_id.into(),
        }
    }
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSender {
    User,
    Assistant,
}

/// Content of a turn: plain text, or an opaque marker for interactive content
/// (chip rows, link buttons, embedded forms). Interactive content collapses to
/// [`INTERACTIVE_PLACEHOLDER`] for persistence and backend context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnContent {
    Text(String),
    Interactive,
}

impl TurnContent {
    /// The string form eligible for persistence and backend context.
    pub fn as_context_str(&self) -> &str {
        match self {
            TurnContent::Text(text) => text,
            TurnContent::Interactive => INTERACTIVE_PLACEHOLDER,
        }
    }
}

/// One exchange unit in the transcript. Append-only: a turn is never mutated
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub sender: TurnSender,
    pub content: TurnContent,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(sender: TurnSender, content: TurnContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            content,
            created_at: Utc::now(),
        }
    }

    /// Creates a user-authored plain-text turn with a generated id.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnSender::User, TurnContent::Text(text.into()))
    }

    /// Creates an assistant plain-text turn with a generated id.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnSender::Assistant, TurnContent::Text(text.into()))
    }

    /// Creates an assistant turn enclosing interactive content.
    pub fn interactive(sender: TurnSender) -> Self {
        Self::new(sender, TurnContent::Interactive)
    }

    /// True when the content is a plain string (eligible for backend context as-is).
    pub fn is_plain(&self) -> bool {
        matches!(self.content, TurnContent::Text(_))
    }
}

/// Business profile fields used by the assistant: display name and the optional
/// outward links the renderer may materialize. A missing link means the
/// corresponding directive is silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: String,
    pub name: Option<String>,
    pub google_review_url: Option<String>,
    pub instagram_url: Option<String>,
    pub whatsapp_url: Option<String>,
    pub youtube_url: Option<String>,
    pub website_url: Option<String>,
}

impl BusinessProfile {
    /// Display name with a generic fallback for unconfigured businesses.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("our restaurant")
    }
}

/// A single orderable menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// A fixed-price bundle of menu items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combo {
    pub name: String,
    pub items: Vec<String>,
    pub price: Option<f64>,
}

/// An active event guests can ask about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// Read-only catalog, combo, category, event, and business data supplied at session
/// start. Treated as immutable for the session's lifetime; there is no live-update
/// contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainSnapshot {
    pub business: BusinessProfile,
    pub items: Vec<CatalogItem>,
    pub combos: Vec<Combo>,
    pub categories: Vec<String>,
    pub events: Vec<EventInfo>,
}
