//! # prompt
//!
//! Formats the domain snapshot and conversation into the messages sent to the
//! assistant backend.
//!
//! ## Format
//!
//! - **System**: role instructions (including the bracket-tag protocol the
//!   assistant must emit) followed by business name, menu, combos, and events.
//! - **History**: one message per transcript turn, roles mapped one-to-one.
//! - **Question**: the new user prompt as the final user message.
//!
//! ## External interactions
//!
//! - **Assistant backend**: output is consumed by chat-completions style APIs.

use dinebot_core::DomainSnapshot;

/// Role of a message, one-to-one with chat-completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat message, one-to-one with one element of the backend `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Section title for the menu block.
pub const SECTION_MENU: &str = "Menu:";

/// Section title for the combos block.
pub const SECTION_COMBOS: &str = "Combos:";

/// Section title for the events block.
pub const SECTION_EVENTS: &str = "Upcoming events:";

/// Fixed marker the assistant is instructed to use when recapping an order.
/// The order confirmation workflow extracts the summary after the last
/// occurrence of this marker.
pub const ORDER_SUMMARY_MARKER: &str = "Here's the order so far:";

/// Role and protocol instructions sent as the head of every system message.
/// Teaches the assistant the bracket-tag directives the client materializes
/// into interactive affordances.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
You are a friendly ordering assistant for a restaurant. Help guests browse the \
menu, build an order, hear about events, and leave feedback. Reply in short \
plain text. You may embed these tags, which the client turns into tappable \
controls and must appear exactly as written:\n\
- [CHIP:label] for a quick-reply choice\n\
- [ADDON:label] / [MODIFIER:label] for add-ons or changes to the item being customized\n\
- [GOOGLE_REVIEW_LINK] [INSTAGRAM_LINK] [WHATSAPP_LINK] [YOUTUBE_LINK] [WEBSITE_LINK] to share a business link\n\
- [SUGGEST_FEEDBACK] to offer the feedback form\n\
- [CONFIRM_ORDER] to offer order confirmation, after recapping the order on a \
line starting with \"Here's the order so far:\"\n\
Only offer items that exist on the menu below.";

/// Builds the full system message: instructions plus the snapshot context blocks.
/// Empty snapshot sections are omitted.
pub fn build_system_context(snapshot: &DomainSnapshot) -> String {
    let mut out = String::from(ASSISTANT_INSTRUCTIONS);

    out.push_str("\n\nBusiness: ");
    out.push_str(snapshot.business.display_name());
    out.push('\n');

    if !snapshot.items.is_empty() {
        out.push('\n');
        out.push_str(SECTION_MENU);
        out.push('\n');
        for item in &snapshot.items {
            out.push_str("- ");
            out.push_str(&item.name);
            if let Some(price) = item.price {
                out.push_str(&format!(" — {:.2}", price));
            }
            if let Some(category) = &item.category {
                out.push_str(&format!(" ({})", category));
            }
            if let Some(description) = &item.description {
                out.push_str(": ");
                out.push_str(description);
            }
            out.push('\n');
        }
    }

    if !snapshot.combos.is_empty() {
        out.push('\n');
        out.push_str(SECTION_COMBOS);
        out.push('\n');
        for combo in &snapshot.combos {
            out.push_str("- ");
            out.push_str(&combo.name);
            if let Some(price) = combo.price {
                out.push_str(&format!(" — {:.2}", price));
            }
            if !combo.items.is_empty() {
                out.push_str(": ");
                out.push_str(&combo.items.join(", "));
            }
            out.push('\n');
        }
    }

    if !snapshot.events.is_empty() {
        out.push('\n');
        out.push_str(SECTION_EVENTS);
        out.push('\n');
        for event in &snapshot.events {
            out.push_str("- ");
            out.push_str(&event.name);
            if let Some(date) = &event.date {
                out.push_str(&format!(" ({})", date));
            }
            if let Some(description) = &event.description {
                out.push_str(": ");
                out.push_str(description);
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinebot_core::{BusinessProfile, CatalogItem, EventInfo};

    fn snapshot() -> DomainSnapshot {
        DomainSnapshot {
            business: BusinessProfile {
                id: "b1".to_string(),
                name: Some("Trattoria Rossi".to_string()),
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
            events: vec![EventInfo {
                name: "Jazz Night".to_string(),
                date: Some("Friday".to_string()),
                description: None,
            }],
        }
    }

    #[test]
    fn system_context_contains_business_and_menu() {
        let context = build_system_context(&snapshot());
        assert!(context.contains("Business: Trattoria Rossi"));
        assert!(context.contains(SECTION_MENU));
        assert!(context.contains("- Margherita Pizza — 9.50 (Pizza)"));
        assert!(context.contains(SECTION_EVENTS));
        assert!(context.contains("- Jazz Night (Friday)"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let context = build_system_context(&DomainSnapshot::default());
        assert!(context.contains("Business: our restaurant"));
        assert!(!context.contains(SECTION_MENU));
        assert!(!context.contains(SECTION_COMBOS));
        assert!(!context.contains(SECTION_EVENTS));
    }

    #[test]
    fn instructions_cover_every_tag_family() {
        for tag in [
            "[CHIP:",
            "[ADDON:",
            "[MODIFIER:",
            "[GOOGLE_REVIEW_LINK]",
            "[SUGGEST_FEEDBACK]",
            "[CONFIRM_ORDER]",
        ] {
            assert!(ASSISTANT_INSTRUCTIONS.contains(tag), "missing {tag}");
        }
        assert!(ASSISTANT_INSTRUCTIONS.contains(ORDER_SUMMARY_MARKER));
    }
}
