//! Shared test doubles for the session controller tests: a scripted assistant
//! backend and recording/failing collaborator ports.

use std::collections::VecDeque;
use std::sync::Mutex;

use assistant_client::AssistantBackend;
use async_trait::async_trait;
use dinebot_core::{
    BusinessProfile, CatalogItem, DinebotError, DomainSnapshot, FeedbackSink,
    FeedbackSubmission, MediaUploader, TaskDispatcher, UploadedMedia,
};
use prompt::ChatMessage;

/// Backend returning canned responses in order; records every request.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedBackend {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Content of the final (current-prompt) message of request `index`.
    pub fn prompt_of_request(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index]
            .last()
            .expect("request has messages")
            .content
            .clone()
    }
}

#[async_trait]
impl AssistantBackend for ScriptedBackend {
    async fn complete(&self, messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

/// Backend that always fails with a transport-style error.
pub struct FailingBackend;

#[async_trait]
impl AssistantBackend for FailingBackend {
    async fn complete(&self, _messages: Vec<ChatMessage>) -> anyhow::Result<String> {
        anyhow::bail!("backend unavailable")
    }
}

/// Dispatcher recording (table, description) pairs; optionally failing.
pub struct RecordingDispatcher {
    pub calls: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl TaskDispatcher for RecordingDispatcher {
    async fn submit(&self, table_id: &str, description: &str) -> dinebot_core::Result<()> {
        if self.fail {
            return Err(DinebotError::Dispatch("dispatcher offline".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((table_id.to_string(), description.to_string()));
        Ok(())
    }
}

/// Sink recording submissions; optionally failing.
pub struct RecordingSink {
    pub submissions: Mutex<Vec<FeedbackSubmission>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl FeedbackSink for RecordingSink {
    async fn submit(
        &self,
        _business_id: &str,
        feedback: &FeedbackSubmission,
        _table_id: &str,
    ) -> dinebot_core::Result<()> {
        if self.fail {
            return Err(DinebotError::Dispatch("sink offline".to_string()));
        }
        self.submissions.lock().unwrap().push(feedback.clone());
        Ok(())
    }
}

/// Uploader returning a fixed outcome: a URL, or `None` for upload failure.
pub struct StaticUploader {
    pub url: Option<String>,
}

impl StaticUploader {
    pub fn succeeding() -> Self {
        Self {
            url: Some("https://media.example/photo.jpg".to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { url: None }
    }
}

#[async_trait]
impl MediaUploader for StaticUploader {
    async fn upload(
        &self,
        _path: &str,
        _bytes: &[u8],
    ) -> dinebot_core::Result<Option<UploadedMedia>> {
        Ok(self.url.clone().map(|download_url| UploadedMedia { download_url }))
    }
}

/// Snapshot with one pizza on the menu and a configured review link.
pub fn snapshot() -> DomainSnapshot {
    DomainSnapshot {
        business: BusinessProfile {
            id: "b1".to_string(),
            name: Some("Trattoria Rossi".to_string()),
            google_review_url: Some("https://g.example/review".to_string()),
            ..Default::default()
        },
        items: vec![CatalogItem {
            name: "Margherita Pizza".to_string(),
            price: Some(9.5),
            category: Some("Pizza".to_string()),
            description: None,
        }],
        combos: vec![],
        categories: vec!["Pizza".to_string()],
        events: vec![],
    }
}
