//! # session
//!
//! The conversational ordering orchestrator: bounded conversation window,
//! customization context tracking, directive rendering, the feedback and order
//! confirmation sub-workflows, and the [`SessionController`] that ties them to
//! the assistant backend and persistence.
//!
//! One [`SessionController`] exists per (business, table) session; all mutable
//! state (customization slot, in-flight flags) lives on it, so concurrent
//! tables cannot cross-contaminate.

mod controller;
mod customize;
mod feedback;
mod history;
mod order;
mod renderer;

pub use controller::{SessionConfig, SessionController};
pub use customize::CustomizationTracker;
pub use feedback::{FeedbackDraft, FeedbackImage, FeedbackStage, FeedbackWorkflow};
pub use history::{ConversationWindow, WINDOW_TURNS};
pub use order::{OrderStage, OrderWorkflow};
pub use renderer::{
    backend_failure_message, extract_order_summary, render, Chip, FeedbackTarget,
    OutboundMessage, FALLBACK_ORDER_SUMMARY,
};
