//! Feedback sub-workflow: target selection, form state, validation gate, and
//! submission transitions.
//!
//! The async submission itself (image upload, sink call, synthetic turn) is
//! orchestrated by the session controller; this module owns the state machine
//! and the validation rules.

use dinebot_core::WorkflowError;

use crate::renderer::FeedbackTarget;

/// Workflow stage: `Idle` until the assistant suggests feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStage {
    Idle,
    TargetSelection,
    FormOpen,
    Submitting,
    Resolved,
}

/// Optional image attached to a draft. Uploaded before the textual feedback is
/// submitted; the feedback is never submitted without its image reference.
#[derive(Debug, Clone)]
pub struct FeedbackImage {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// Transient form state; destroyed on successful submit or conversation reset.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDraft {
    pub rating: Option<u8>,
    pub comment: String,
    pub image: Option<FeedbackImage>,
}

#[derive(Debug, Default)]
pub struct FeedbackWorkflow {
    stage: FeedbackStage,
    target: Option<FeedbackTarget>,
    draft: FeedbackDraft,
}

impl Default for FeedbackStage {
    fn default() -> Self {
        FeedbackStage::Idle
    }
}

impl FeedbackWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> FeedbackStage {
        self.stage
    }

    pub fn target(&self) -> Option<&FeedbackTarget> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    /// The assistant suggested feedback; wait for a target choice.
    pub fn offer(&mut self) {
        self.stage = FeedbackStage::TargetSelection;
        self.target = None;
        self.draft = FeedbackDraft::default();
    }

    /// Opens the form for the chosen target.
    pub fn choose_target(&mut self, target: FeedbackTarget) -> Result<(), WorkflowError> {
        if self.stage != FeedbackStage::TargetSelection {
            return Err(WorkflowError::NoActiveFeedback);
        }
        self.target = Some(target);
        self.draft = FeedbackDraft::default();
        self.stage = FeedbackStage::FormOpen;
        Ok(())
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), WorkflowError> {
        self.require_form_open()?;
        if !(1..=5).contains(&rating) {
            return Err(WorkflowError::RatingOutOfRange);
        }
        self.draft.rating = Some(rating);
        Ok(())
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), WorkflowError> {
        self.require_form_open()?;
        self.draft.comment = comment.into();
        Ok(())
    }

    pub fn attach_image(&mut self, path: String, bytes: Vec<u8>) -> Result<(), WorkflowError> {
        self.require_form_open()?;
        self.draft.image = Some(FeedbackImage { path, bytes });
        Ok(())
    }

    /// Validation gate: a rating is required; low ratings (≤ 2) additionally
    /// require a non-empty comment. The image is always optional.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let rating = self.draft.rating.ok_or(WorkflowError::RatingMissing)?;
        if rating <= 2 && self.draft.comment.trim().is_empty() {
            return Err(WorkflowError::CommentRequired);
        }
        Ok(())
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.stage == FeedbackStage::FormOpen && self.validate().is_ok()
    }

    /// Validates and moves to `Submitting`, handing the caller the target and a
    /// copy of the draft to submit. A second call while submitting is rejected.
    pub fn begin_submit(&mut self) -> Result<(FeedbackTarget, FeedbackDraft), WorkflowError> {
        match self.stage {
            FeedbackStage::Submitting => Err(WorkflowError::SubmissionInFlight),
            FeedbackStage::FormOpen => {
                self.validate()?;
                let target = self
                    .target
                    .clone()
                    .ok_or(WorkflowError::NoActiveFeedback)?;
                self.stage = FeedbackStage::Submitting;
                Ok((target, self.draft.clone()))
            }
            _ => Err(WorkflowError::NoActiveFeedback),
        }
    }

    /// Submission failed: reopen the form with the draft retained for retry.
    pub fn fail_submit(&mut self) {
        self.stage = FeedbackStage::FormOpen;
    }

    /// Submission succeeded: the draft resets fully.
    pub fn complete_submit(&mut self) {
        self.stage = FeedbackStage::Resolved;
        self.target = None;
        self.draft = FeedbackDraft::default();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn require_form_open(&self) -> Result<(), WorkflowError> {
        match self.stage {
            FeedbackStage::FormOpen => Ok(()),
            FeedbackStage::Submitting => Err(WorkflowError::SubmissionInFlight),
            _ => Err(WorkflowError::NoActiveFeedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_form() -> FeedbackWorkflow {
        let mut workflow = FeedbackWorkflow::new();
        workflow.offer();
        workflow
            .choose_target(FeedbackTarget::Assistant)
            .expect("target accepted");
        workflow
    }

    #[test]
    fn gate_requires_rating() {
        let workflow = open_form();
        assert!(!workflow.can_submit());
    }

    #[test]
    fn low_rating_requires_comment() {
        let mut workflow = open_form();
        workflow.set_rating(2).unwrap();
        assert!(!workflow.can_submit());

        workflow.set_comment("ok").unwrap();
        assert!(workflow.can_submit());
    }

    #[test]
    fn high_rating_needs_no_comment() {
        let mut workflow = open_form();
        workflow.set_rating(5).unwrap();
        assert!(workflow.can_submit());
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let mut workflow = open_form();
        assert!(matches!(
            workflow.set_rating(0),
            Err(WorkflowError::RatingOutOfRange)
        ));
        assert!(matches!(
            workflow.set_rating(6),
            Err(WorkflowError::RatingOutOfRange)
        ));
    }

    #[test]
    fn failed_submit_keeps_the_draft() {
        let mut workflow = open_form();
        workflow.set_rating(4).unwrap();
        workflow.set_comment("tasty").unwrap();

        let (_, draft) = workflow.begin_submit().unwrap();
        assert_eq!(draft.rating, Some(4));

        workflow.fail_submit();
        assert_eq!(workflow.stage(), FeedbackStage::FormOpen);
        assert_eq!(workflow.draft().comment, "tasty");
        assert!(workflow.can_submit());
    }

    #[test]
    fn double_submit_is_rejected_while_in_flight() {
        let mut workflow = open_form();
        workflow.set_rating(4).unwrap();
        workflow.begin_submit().unwrap();

        assert!(matches!(
            workflow.begin_submit(),
            Err(WorkflowError::SubmissionInFlight)
        ));
    }

    #[test]
    fn successful_submit_resets_fully() {
        let mut workflow = open_form();
        workflow.set_rating(4).unwrap();
        workflow.set_comment("tasty").unwrap();
        workflow.begin_submit().unwrap();
        workflow.complete_submit();

        assert_eq!(workflow.stage(), FeedbackStage::Resolved);
        assert!(workflow.target().is_none());
        assert!(workflow.draft().rating.is_none());
        assert!(workflow.draft().comment.is_empty());
    }
}
