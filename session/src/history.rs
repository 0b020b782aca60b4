//! Bounded conversation window.
//!
//! Holds the last [`WINDOW_TURNS`] turns for on-screen replay and backend
//! context. Oldest turns are evicted first. Only plain-string content is sent
//! to the backend; interactive content is replaced with the fixed sentinel so
//! the backend never receives an un-serializable payload.

use std::collections::VecDeque;

use dinebot_core::{Turn, TurnContent, TurnSender};
use prompt::ChatMessage;

/// Window bound: 6 user/assistant pairs.
pub const WINDOW_TURNS: usize = 12;

#[derive(Debug, Clone)]
pub struct ConversationWindow {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ConversationWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a turn, evicting the oldest when the window is full.
    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Most recent user-authored plain-text turn, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|turn| match &turn.content {
            TurnContent::Text(text) if turn.sender == TurnSender::User => Some(text.as_str()),
            _ => None,
        })
    }

    /// Backend context: one message per turn in window order. Interactive
    /// content appears as the sentinel string, never as UI state.
    pub fn as_backend_messages(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .map(|turn| {
                let content = turn.content.as_context_str();
                match turn.sender {
                    TurnSender::User => ChatMessage::user(content),
                    TurnSender::Assistant => ChatMessage::assistant(content),
                }
            })
            .collect()
    }
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new(WINDOW_TURNS)
    }
}
