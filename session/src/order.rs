//! Order confirmation sub-workflow: summary seeding, optional notes, and the
//! confirm transition with an in-flight guard.
//!
//! Dispatching the service request and appending to the persisted order
//! history are orchestrated by the session controller.

use dinebot_core::WorkflowError;

/// Fixed separator joining notes onto the summary before dispatch.
const NOTES_SEPARATOR: &str = ". Notes: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStage {
    Idle,
    SummaryShown,
    Confirming,
}

#[derive(Debug)]
pub struct OrderWorkflow {
    stage: OrderStage,
    summary: Option<String>,
    notes: String,
}

impl Default for OrderWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderWorkflow {
    pub fn new() -> Self {
        Self {
            stage: OrderStage::Idle,
            summary: None,
            notes: String::new(),
        }
    }

    pub fn stage(&self) -> OrderStage {
        self.stage
    }

    /// Seeds the confirmation control with an extracted summary. A later
    /// confirm-order response replaces any pending one.
    pub fn seed(&mut self, summary: String) {
        self.stage = OrderStage::SummaryShown;
        self.summary = Some(summary);
        self.notes.clear();
    }

    pub fn pending_summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Optional free-text notes; only meaningful while a summary is shown.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), WorkflowError> {
        match self.stage {
            OrderStage::SummaryShown => {
                self.notes = notes.into();
                Ok(())
            }
            OrderStage::Confirming => Err(WorkflowError::ConfirmationInFlight),
            OrderStage::Idle => Err(WorkflowError::NoPendingOrder),
        }
    }

    /// Moves to `Confirming` and returns the composed dispatch text: the
    /// summary, with non-empty notes appended after the fixed separator.
    /// A second call while confirming is rejected, so a double tap cannot
    /// create two order entries.
    pub fn begin_confirm(&mut self) -> Result<String, WorkflowError> {
        match self.stage {
            OrderStage::Confirming => Err(WorkflowError::ConfirmationInFlight),
            OrderStage::Idle => Err(WorkflowError::NoPendingOrder),
            OrderStage::SummaryShown => {
                let summary = self
                    .summary
                    .clone()
                    .ok_or(WorkflowError::NoPendingOrder)?;
                self.stage = OrderStage::Confirming;
                let notes = self.notes.trim();
                if notes.is_empty() {
                    Ok(summary)
                } else {
                    Ok(format!("{}{}{}", summary, NOTES_SEPARATOR, notes))
                }
            }
        }
    }

    /// Dispatch failed: back to the summary so the user may retry.
    pub fn fail_confirm(&mut self) {
        self.stage = OrderStage::SummaryShown;
    }

    /// Dispatch succeeded: clears the pending order and returns its item lines
    /// (the bare summary split into non-empty lines, notes excluded).
    pub fn complete_confirm(&mut self) -> Vec<String> {
        let items = self
            .summary
            .take()
            .map(|summary| {
                summary
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        self.stage = OrderStage::Idle;
        self.notes.clear();
        items
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
