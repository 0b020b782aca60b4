//! # dinebot-core
//!
//! Core types and traits for the table-ordering assistant: session identity, [`Turn`],
//! domain snapshot types, the collaborator ports ([`MediaUploader`], [`TaskDispatcher`],
//! [`FeedbackSink`]), error taxonomy, and tracing initialization. UI- and
//! transport-agnostic; used by every other crate in the workspace.

pub mod error;
pub mod logger;
pub mod ports;
pub mod types;

pub use error::{DinebotError, Result, WorkflowError};
pub use logger::init_tracing;
pub use ports::{FeedbackSink, FeedbackSubmission, MediaUploader, TaskDispatcher, UploadedMedia};
pub use types::{
    BusinessProfile, CatalogItem, Combo, DomainSnapshot, EventInfo, SessionKey, Turn,
    TurnContent, TurnSender, INTERACTIVE_PLACEHOLDER,
};
