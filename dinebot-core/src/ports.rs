//! Collaborator ports: external capabilities the orchestrator depends on.
//!
//! Implementations live elsewhere (the `storage` crate ships SQLite and filesystem
//! adapters; tests use scripted mocks). All ports are object-safe and held as
//! `Arc<dyn …>` by the session controller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of a successful media upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub download_url: String,
}

/// Stores a media blob and returns its download URL.
///
/// `Ok(None)` signals upload failure; `Err` is reserved for local programming or IO
/// errors outside the upload itself. Callers must treat `None` as "abort and retry",
/// never submit dependent data without the media reference.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<Option<UploadedMedia>>;
}

/// Dispatches a service/task request (order ticket, call-waiter) for a table.
/// Fire-and-forget beyond success/failure.
#[async_trait]
pub trait TaskDispatcher: Send + Sync {
    async fn submit(&self, table_id: &str, description: &str) -> Result<()>;
}

/// One completed feedback entry ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    /// What the feedback is about ("business name" or the assistant itself).
    pub target: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub image_url: Option<String>,
}

/// Accepts a completed feedback submission for a business.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn submit(
        &self,
        business_id: &str,
        feedback: &FeedbackSubmission,
        table_id: &str,
    ) -> Result<()>;
}
