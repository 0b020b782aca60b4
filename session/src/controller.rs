//! Session controller: the top-level loop for one (business, table) session.
//!
//! Accepts typed input or chip selections, serializes the bounded history
//! window plus the domain snapshot, invokes the assistant backend exactly once
//! per input, feeds the raw response through the parser and renderer, and
//! persists every turn. Owns the single in-flight-request invariant and the
//! "thinking" state, plus the feedback and order sub-workflow instances.

use std::sync::Arc;
use std::time::Duration;

use assistant_client::AssistantBackend;
use dinebot_core::{
    DinebotError, DomainSnapshot, FeedbackSink, FeedbackSubmission, MediaUploader, Result,
    SessionKey, TaskDispatcher, Turn, TurnSender,
};
use prompt::ChatMessage;
use protocol::{ActionKind, Directive, OptionKind};
use storage::{OrderHistoryRepository, OrderRecord, TranscriptRepository};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::customize::CustomizationTracker;
use crate::feedback::{FeedbackStage, FeedbackWorkflow};
use crate::history::{ConversationWindow, WINDOW_TURNS};
use crate::order::{OrderStage, OrderWorkflow};
use crate::renderer::{
    backend_failure_message, extract_order_summary, render, Chip, FeedbackTarget,
    OutboundMessage,
};

/// Tunables for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// History window bound (turns, not pairs).
    pub window_turns: usize,
    /// Upper bound on one backend round-trip; a hung call degrades to the
    /// apologetic message instead of stranding the session in `thinking`.
    pub backend_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_turns: WINDOW_TURNS,
            backend_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    AwaitingResponse,
}

pub struct SessionController {
    key: SessionKey,
    snapshot: DomainSnapshot,
    backend: Arc<dyn AssistantBackend>,
    uploader: Arc<dyn MediaUploader>,
    dispatcher: Arc<dyn TaskDispatcher>,
    feedback_sink: Arc<dyn FeedbackSink>,
    transcript: TranscriptRepository,
    orders: OrderHistoryRepository,
    config: SessionConfig,
    state: SessionState,
    window: ConversationWindow,
    tracker: CustomizationTracker,
    feedback: FeedbackWorkflow,
    order: OrderWorkflow,
}

impl SessionController {
    /// Constructs a controller. Does not perform I/O; call [`start`] to restore
    /// or seed the transcript.
    ///
    /// [`start`]: SessionController::start
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key: SessionKey,
        snapshot: DomainSnapshot,
        backend: Arc<dyn AssistantBackend>,
        uploader: Arc<dyn MediaUploader>,
        dispatcher: Arc<dyn TaskDispatcher>,
        feedback_sink: Arc<dyn FeedbackSink>,
        transcript: TranscriptRepository,
        orders: OrderHistoryRepository,
        config: SessionConfig,
    ) -> Self {
        let window = ConversationWindow::new(config.window_turns);
        Self {
            key,
            snapshot,
            backend,
            uploader,
            dispatcher,
            feedback_sink,
            transcript,
            orders,
            config,
            state: SessionState::Idle,
            window,
            tracker: CustomizationTracker::new(),
            feedback: FeedbackWorkflow::new(),
            order: OrderWorkflow::new(),
        }
    }

    /// True while a backend invocation is in flight; the UI disables its input
    /// control on this flag rather than queueing or dropping input.
    pub fn thinking(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    /// Restores the persisted transcript, or seeds the greeting turn when none
    /// exists. Returns the messages to replay on screen.
    pub async fn start(&mut self) -> Result<Vec<OutboundMessage>> {
        let records = self
            .transcript
            .load(&self.key)
            .await
            .map_err(|e| DinebotError::Storage(e.to_string()))?;

        self.window.clear();
        if records.is_empty() {
            return self.seed_greeting().await;
        }

        let mut replay = Vec::with_capacity(records.len());
        for record in records {
            let turn = record.into_turn();
            replay.push(OutboundMessage::Text(
                turn.content.as_context_str().to_string(),
            ));
            self.window.push(turn);
        }
        info!(
            table_id = %self.key.table_id,
            turns = self.window.len(),
            "step: session restored"
        );
        Ok(replay)
    }

    /// Clears the transcript and re-seeds the greeting. Order history is
    /// untouched.
    pub async fn reset(&mut self) -> Result<Vec<OutboundMessage>> {
        self.transcript
            .clear(&self.key)
            .await
            .map_err(|e| DinebotError::Storage(e.to_string()))?;
        self.window.clear();
        self.tracker.clear();
        self.feedback.reset();
        self.order.reset();
        self.state = SessionState::Idle;
        info!(table_id = %self.key.table_id, "step: session reset");
        self.seed_greeting().await
    }

    /// Typed user input; sent verbatim (typing does not clear an active
    /// customization context, only folding a chip selection does).
    pub async fn send_message(&mut self, text: &str) -> Result<Vec<OutboundMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.respond(text.to_string()).await
    }

    /// Chip tap. Addon/modifier chips fold into the customization context when
    /// one is active; selectable chips and context-less taps go verbatim.
    pub async fn select_chip(&mut self, chip: &Chip) -> Result<Vec<OutboundMessage>> {
        let prompt_text = match chip.kind {
            OptionKind::Addon | OptionKind::Modifier => self
                .tracker
                .compose(&chip.label)
                .unwrap_or_else(|| chip.label.clone()),
            OptionKind::Selectable => chip.label.clone(),
        };
        self.respond(prompt_text).await
    }

    /// One request/response cycle: append the user turn, invoke the backend
    /// once under the timeout, and render the outcome. A backend failure
    /// degrades to a single apologetic message; the user's turn stays recorded.
    async fn respond(&mut self, prompt_text: String) -> Result<Vec<OutboundMessage>> {
        if self.state == SessionState::AwaitingResponse {
            return Err(DinebotError::InputLocked);
        }

        self.append_turn(Turn::user(prompt_text.clone())).await?;

        self.state = SessionState::AwaitingResponse;
        info!(
            table_id = %self.key.table_id,
            prompt = %prompt_text,
            "step: assistant request started"
        );

        let messages = self.build_backend_messages();
        let outcome = timeout(self.config.backend_timeout, self.backend.complete(messages)).await;
        self.state = SessionState::Idle;

        match outcome {
            Ok(Ok(raw)) => {
                info!(
                    table_id = %self.key.table_id,
                    response_len = raw.len(),
                    "step: assistant request finished"
                );
                self.handle_response(&raw).await
            }
            Ok(Err(e)) => {
                warn!(table_id = %self.key.table_id, error = %e, "Assistant backend failed");
                self.apologize(Some(e.to_string())).await
            }
            Err(_) => {
                warn!(
                    table_id = %self.key.table_id,
                    timeout_secs = self.config.backend_timeout.as_secs(),
                    "Assistant backend timed out"
                );
                self.apologize(Some("the assistant took too long to respond".to_string()))
                    .await
            }
        }
    }

    /// Parses, updates the customization slot, arms sub-workflows, persists the
    /// assistant turns, and returns the rendered messages.
    async fn handle_response(&mut self, raw: &str) -> Result<Vec<OutboundMessage>> {
        let parsed = protocol::parse(raw);

        // Infer before the assistant turn enters the window so the fallback
        // sees the latest user-authored turn.
        let last_user = self.window.last_user_text().map(str::to_string);
        self.tracker
            .observe(&parsed, &self.snapshot, last_user.as_deref());

        let messages = render(&parsed, &self.snapshot.business);

        if !parsed.plain_text.is_empty() {
            self.append_turn(Turn::assistant(parsed.plain_text.clone()))
                .await?;
        }
        let has_interactive = messages
            .iter()
            .any(|message| !matches!(message, OutboundMessage::Text(_)));
        if has_interactive {
            self.append_turn(Turn::interactive(TurnSender::Assistant))
                .await?;
        }

        for directive in &parsed.directives {
            match directive {
                Directive::Action(ActionKind::SuggestFeedback) => self.feedback.offer(),
                Directive::Action(ActionKind::ConfirmOrder) => {
                    self.order.seed(extract_order_summary(&parsed.plain_text));
                }
                _ => {}
            }
        }

        Ok(messages)
    }

    async fn apologize(&mut self, reason: Option<String>) -> Result<Vec<OutboundMessage>> {
        let text = backend_failure_message(reason.as_deref());
        self.append_turn(Turn::assistant(text.clone())).await?;
        Ok(vec![OutboundMessage::Text(text)])
    }

    fn build_backend_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.window.len() + 1);
        messages.push(ChatMessage::system(prompt::build_system_context(
            &self.snapshot,
        )));
        messages.extend(self.window.as_backend_messages());
        messages
    }

    async fn seed_greeting(&mut self) -> Result<Vec<OutboundMessage>> {
        let greeting = format!(
            "Welcome to {}! I can help you browse the menu, place an order, or tell you about our events. What would you like?",
            self.snapshot.business.display_name()
        );
        self.append_turn(Turn::assistant(greeting.clone())).await?;
        Ok(vec![OutboundMessage::Text(greeting)])
    }

    async fn append_turn(&mut self, turn: Turn) -> Result<()> {
        self.transcript
            .append(&self.key, &turn, self.config.window_turns as i64)
            .await
            .map_err(|e| DinebotError::Storage(e.to_string()))?;
        self.window.push(turn);
        Ok(())
    }

    // ---- feedback sub-workflow -------------------------------------------

    pub fn feedback_stage(&self) -> FeedbackStage {
        self.feedback.stage()
    }

    /// Opens the feedback form for the chosen target and records the embedded
    /// form as an interactive turn.
    pub async fn choose_feedback_target(
        &mut self,
        target: FeedbackTarget,
    ) -> Result<Vec<OutboundMessage>> {
        self.feedback.choose_target(target.clone())?;
        self.append_turn(Turn::interactive(TurnSender::Assistant))
            .await?;
        Ok(vec![OutboundMessage::FeedbackForm { target }])
    }

    pub fn set_feedback_rating(&mut self, rating: u8) -> Result<()> {
        self.feedback.set_rating(rating).map_err(Into::into)
    }

    pub fn set_feedback_comment(&mut self, comment: &str) -> Result<()> {
        self.feedback.set_comment(comment).map_err(Into::into)
    }

    pub fn attach_feedback_image(&mut self, path: &str, bytes: Vec<u8>) -> Result<()> {
        self.feedback
            .attach_image(path.to_string(), bytes)
            .map_err(Into::into)
    }

    /// Whether the form's submit control is enabled.
    pub fn feedback_can_submit(&self) -> bool {
        self.feedback.can_submit()
    }

    /// Submits the open feedback form: uploads the optional image first, then
    /// the textual feedback. On failure the form stays open with the draft
    /// retained. On success a synthetic user turn summarizing the rating is
    /// appended and fed through the normal response path.
    pub async fn submit_feedback(&mut self) -> Result<Vec<OutboundMessage>> {
        let (target, draft) = self.feedback.begin_submit()?;

        let image_url = match &draft.image {
            Some(image) => {
                match self.uploader.upload(&image.path, &image.bytes).await {
                    Ok(Some(uploaded)) => Some(uploaded.download_url),
                    Ok(None) => {
                        self.feedback.fail_submit();
                        return Err(DinebotError::Upload(
                            "image upload failed; feedback not submitted".to_string(),
                        ));
                    }
                    Err(e) => {
                        self.feedback.fail_submit();
                        return Err(e);
                    }
                }
            }
            None => None,
        };

        let Some(rating) = draft.rating else {
            self.feedback.fail_submit();
            return Err(dinebot_core::WorkflowError::RatingMissing.into());
        };
        let comment = {
            let trimmed = draft.comment.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        let submission = FeedbackSubmission {
            target: target.label().to_string(),
            rating,
            comment: comment.clone(),
            image_url,
        };

        if let Err(e) = self
            .feedback_sink
            .submit(&self.key.business_id, &submission, &self.key.table_id)
            .await
        {
            self.feedback.fail_submit();
            return Err(e);
        }

        self.feedback.complete_submit();
        info!(
            table_id = %self.key.table_id,
            rating,
            "step: feedback submitted"
        );

        let mut synthetic = format!("submitted {}-star rating", rating);
        if let Some(comment) = comment {
            synthetic.push_str(&format!(" with comment: {}", comment));
        }
        self.respond(synthetic).await
    }

    // ---- order confirmation sub-workflow ---------------------------------

    pub fn order_stage(&self) -> OrderStage {
        self.order.stage()
    }

    pub fn pending_order_summary(&self) -> Option<&str> {
        self.order.pending_summary()
    }

    pub fn set_order_notes(&mut self, notes: &str) -> Result<()> {
        self.order.set_notes(notes).map_err(Into::into)
    }

    /// Confirms the pending order: dispatches one service request, then appends
    /// the order to the persisted history and acknowledges in the
    /// conversation. On dispatch failure nothing is appended and the summary
    /// stays pending for retry.
    pub async fn confirm_order(&mut self) -> Result<Vec<OutboundMessage>> {
        let composed = self.order.begin_confirm()?;

        if let Err(e) = self
            .dispatcher
            .submit(&self.key.table_id, &composed)
            .await
        {
            self.order.fail_confirm();
            return Err(e);
        }

        let items = self.order.complete_confirm();
        self.orders
            .append(&self.key, &items)
            .await
            .map_err(|e| DinebotError::Storage(e.to_string()))?;
        info!(
            table_id = %self.key.table_id,
            items = items.len(),
            "step: order confirmed"
        );

        let ack = "Your order has been placed. We'll bring it to your table shortly.";
        self.append_turn(Turn::assistant(ack)).await?;
        Ok(vec![OutboundMessage::Text(ack.to_string())])
    }

    /// Confirmed orders for this session, oldest first.
    pub async fn order_history(&self) -> Result<Vec<OrderRecord>> {
        self.orders
            .list(&self.key)
            .await
            .map_err(|e| DinebotError::Storage(e.to_string()))
    }

    /// The item currently being customized, if any. Exposed for UIs that want
    /// to hint at the composition behavior.
    pub fn customizing_item(&self) -> Option<&str> {
        self.tracker.active_item()
    }

    /// Replay of the in-memory window, mainly for UIs re-rendering after
    /// interactive updates.
    pub fn window_turns(&self) -> impl Iterator<Item = &Turn> {
        self.window.iter()
    }
}
