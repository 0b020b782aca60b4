//! Message renderer / dispatcher: turns a parsed response into the ordered
//! list of UI messages.
//!
//! Order: plain text (when non-empty), link buttons, one merged chip row, then
//! action messages. A link directive whose URL is not configured on the
//! business profile is silently dropped, not an error.

use dinebot_core::BusinessProfile;
use protocol::{ActionKind, Directive, LinkKind, OptionKind, Parsed};

/// Summary used when a confirm-order response carries no recognizable recap.
pub const FALLBACK_ORDER_SUMMARY: &str = "your current order";

/// Apology shown when the backend fails without a usable reason.
const APOLOGY_FALLBACK: &str =
    "Sorry, something went wrong while answering. Please try again.";

/// One tappable quick-reply control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub kind: OptionKind,
    pub label: String,
}

/// Who a feedback submission is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackTarget {
    Business { name: String },
    Assistant,
}

impl FeedbackTarget {
    pub fn label(&self) -> &str {
        match self {
            FeedbackTarget::Business { name } => name,
            FeedbackTarget::Assistant => "the assistant",
        }
    }
}

/// A message appended to the conversation view. Everything except `Text` is
/// interactive content and persists as the fixed placeholder turn.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Text(String),
    LinkButton {
        kind: LinkKind,
        label: String,
        url: String,
    },
    ChipRow(Vec<Chip>),
    /// Offers a feedback target choice; choosing one opens the form.
    FeedbackOffer { targets: Vec<FeedbackTarget> },
    /// The embedded feedback form for a chosen target.
    FeedbackForm { target: FeedbackTarget },
    /// Embedded confirmation control seeded with the extracted order summary.
    OrderConfirmation { summary: String },
}

/// Renders one parsed response into ordered UI messages.
pub fn render(parsed: &Parsed, profile: &BusinessProfile) -> Vec<OutboundMessage> {
    let mut messages = Vec::new();

    if !parsed.plain_text.is_empty() {
        messages.push(OutboundMessage::Text(parsed.plain_text.clone()));
    }

    for directive in &parsed.directives {
        if let Directive::Link(kind) = directive {
            if let Some(url) = link_url(*kind, profile) {
                messages.push(OutboundMessage::LinkButton {
                    kind: *kind,
                    label: link_label(*kind).to_string(),
                    url: url.to_string(),
                });
            }
        }
    }

    let chips: Vec<Chip> = parsed
        .directives
        .iter()
        .filter_map(|directive| match directive {
            Directive::Option { kind, label } => Some(Chip {
                kind: *kind,
                label: label.clone(),
            }),
            _ => None,
        })
        .collect();
    if !chips.is_empty() {
        messages.push(OutboundMessage::ChipRow(chips));
    }

    let mut seen_actions: Vec<ActionKind> = Vec::new();
    for directive in &parsed.directives {
        if let Directive::Action(kind) = directive {
            if seen_actions.contains(kind) {
                continue;
            }
            seen_actions.push(*kind);
            match kind {
                ActionKind::SuggestFeedback => messages.push(OutboundMessage::FeedbackOffer {
                    targets: vec![
                        FeedbackTarget::Business {
                            name: profile.display_name().to_string(),
                        },
                        FeedbackTarget::Assistant,
                    ],
                }),
                ActionKind::ConfirmOrder => messages.push(OutboundMessage::OrderConfirmation {
                    summary: extract_order_summary(&parsed.plain_text),
                }),
            }
        }
    }

    messages
}

/// Extracts the order recap following the last occurrence of the fixed marker,
/// falling back to a generic summary when the marker is absent.
pub fn extract_order_summary(plain_text: &str) -> String {
    match plain_text.rfind(prompt::ORDER_SUMMARY_MARKER) {
        Some(index) => {
            let after = &plain_text[index + prompt::ORDER_SUMMARY_MARKER.len()..];
            let summary = after.trim();
            if summary.is_empty() {
                FALLBACK_ORDER_SUMMARY.to_string()
            } else {
                summary.to_string()
            }
        }
        None => FALLBACK_ORDER_SUMMARY.to_string(),
    }
}

/// Apologetic message for a failed backend call; carries the error's reason
/// when one is available.
pub fn backend_failure_message(reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.trim().is_empty() => {
            format!("Sorry, I ran into a problem: {}", reason.trim())
        }
        _ => APOLOGY_FALLBACK.to_string(),
    }
}

fn link_url(kind: LinkKind, profile: &BusinessProfile) -> Option<&str> {
    match kind {
        LinkKind::GoogleReview => profile.google_review_url.as_deref(),
        LinkKind::Instagram => profile.instagram_url.as_deref(),
        LinkKind::Whatsapp => profile.whatsapp_url.as_deref(),
        LinkKind::Youtube => profile.youtube_url.as_deref(),
        LinkKind::Website => profile.website_url.as_deref(),
    }
}

fn link_label(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::GoogleReview => "Leave a Google review",
        LinkKind::Instagram => "Follow us on Instagram",
        LinkKind::Whatsapp => "Chat on WhatsApp",
        LinkKind::Youtube => "Watch us on YouTube",
        LinkKind::Website => "Visit our website",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::parse;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            id: "b1".to_string(),
            name: Some("Trattoria Rossi".to_string()),
            google_review_url: Some("https://g.example/review".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_in_text_link_chip_action_order() {
        let parsed = parse(
            "Thanks! [GOOGLE_REVIEW_LINK] [CHIP:Menu] [CHIP:Events] [SUGGEST_FEEDBACK]",
        );
        let messages = render(&parsed, &profile());

        assert_eq!(messages.len(), 4);
        assert!(matches!(&messages[0], OutboundMessage::Text(t) if t == "Thanks!"));
        assert!(matches!(
            &messages[1],
            OutboundMessage::LinkButton { url, .. } if url == "https://g.example/review"
        ));
        assert!(matches!(&messages[2], OutboundMessage::ChipRow(chips) if chips.len() == 2));
        assert!(matches!(&messages[3], OutboundMessage::FeedbackOffer { targets } if targets.len() == 2));
    }

    #[test]
    fn unconfigured_link_is_silently_dropped() {
        let parsed = parse("Follow us! [INSTAGRAM_LINK]");
        let messages = render(&parsed, &profile());
        assert_eq!(messages, vec![OutboundMessage::Text("Follow us!".to_string())]);
    }

    #[test]
    fn empty_plain_text_produces_no_text_message() {
        let parsed = parse("[CHIP:Yes] [CHIP:No]");
        let messages = render(&parsed, &profile());
        assert_eq!(messages.len(), 1);
        assert!(matches!(&messages[0], OutboundMessage::ChipRow(_)));
    }

    #[test]
    fn confirm_order_is_seeded_with_last_marker_summary() {
        let parsed = parse(
            "Here's the order so far:\n2x Pizza\nHere's the order so far: 2x Pizza [CONFIRM_ORDER]",
        );
        let messages = render(&parsed, &profile());

        let confirmation = messages
            .iter()
            .find_map(|m| match m {
                OutboundMessage::OrderConfirmation { summary } => Some(summary.as_str()),
                _ => None,
            })
            .expect("confirmation message present");
        assert_eq!(confirmation, "2x Pizza");
    }

    #[test]
    fn missing_marker_falls_back_to_generic_summary() {
        let parsed = parse("Ready to order? [CONFIRM_ORDER]");
        let messages = render(&parsed, &profile());
        assert!(messages
            .iter()
            .any(|m| matches!(m, OutboundMessage::OrderConfirmation { summary } if summary == FALLBACK_ORDER_SUMMARY)));
    }

    #[test]
    fn backend_failure_prefers_the_reason() {
        assert_eq!(
            backend_failure_message(Some("connection refused")),
            "Sorry, I ran into a problem: connection refused"
        );
        assert_eq!(backend_failure_message(None), APOLOGY_FALLBACK);
    }
}
