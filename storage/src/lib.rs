//! Storage crate: per-session persistence and collaborator adapters.
//!
//! ## Modules
//!
//! - [`models`] – TurnRecord, OrderRecord, ServiceRequestRecord, FeedbackRecord
//! - [`transcript_repo`] – TranscriptRepository (bounded transcript, SQLite)
//! - [`order_repo`] – OrderHistoryRepository (SQLite)
//! - [`service_request_repo`] – ServiceRequestRepository, the [`TaskDispatcher`] adapter
//! - [`feedback_repo`] – FeedbackRepository, the [`FeedbackSink`] adapter
//! - [`media_store`] – FilesystemMediaStore, the [`MediaUploader`] adapter
//! - [`sqlite_pool`] – SqlitePoolManager
//!
//! Transcript and order history are keyed per (business, table) session and are
//! independently clearable.
//!
//! [`TaskDispatcher`]: dinebot_core::TaskDispatcher
//! [`FeedbackSink`]: dinebot_core::FeedbackSink
//! [`MediaUploader`]: dinebot_core::MediaUploader

mod feedback_repo;
mod media_store;
mod models;
mod order_repo;
mod service_request_repo;
mod sqlite_pool;
mod transcript_repo;

#[cfg(test)]
mod media_store_test;
#[cfg(test)]
mod order_repo_test;
#[cfg(test)]
mod request_sink_test;

pub use feedback_repo::FeedbackRepository;
pub use media_store::FilesystemMediaStore;
pub use models::{FeedbackRecord, OrderRecord, ServiceRequestRecord, TurnRecord};
pub use order_repo::OrderHistoryRepository;
pub use service_request_repo::ServiceRequestRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use transcript_repo::TranscriptRepository;
