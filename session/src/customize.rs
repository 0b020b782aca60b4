//! Customization context: the single-slot memory of which catalog item the
//! current addon/modifier options belong to.
//!
//! The slot is last-write-wins; when two option-bearing responses arrive in a
//! row, only the most recent inference is retained. Absence of a context means
//! chip taps are sent verbatim.

use std::sync::OnceLock;

use dinebot_core::DomainSnapshot;
use protocol::Parsed;
use regex::Regex;

#[derive(Debug, Default)]
pub struct CustomizationTracker {
    active: Option<String>,
}

impl CustomizationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The item currently being customized, if any.
    pub fn active_item(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Updates the slot from a parsed response. Only responses carrying
    /// addon/modifier options are considered; inference tries the plain text
    /// first (connective phrase naming a catalog item), then falls back to the
    /// most recent user-authored plain-text turn.
    pub fn observe(
        &mut self,
        parsed: &Parsed,
        snapshot: &DomainSnapshot,
        last_user_text: Option<&str>,
    ) {
        if !parsed.has_customization_options() {
            return;
        }
        if let Some(item) = infer_item(&parsed.plain_text, snapshot) {
            self.active = Some(item);
            return;
        }
        if let Some(text) = last_user_text {
            let text = text.trim();
            if !text.is_empty() {
                self.active = Some(text.to_string());
            }
        }
    }

    /// Folds a selection into the composed prompt and clears the slot.
    /// Returns `None` when no context is active (caller sends the selection
    /// verbatim).
    pub fn compose(&mut self, selection: &str) -> Option<String> {
        self.active
            .take()
            .map(|item| format!("Add {} with {}", item, selection))
    }
}

fn connective_regex() -> &'static Regex {
    static CONNECTIVE_RE: OnceLock<Regex> = OnceLock::new();
    CONNECTIVE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:for|to|on|with)\s+(?:the\s+|your\s+|a\s+|an\s+)?([A-Za-z][A-Za-z0-9'&\- ]*)")
            .expect("connective regex is valid")
    })
}

/// Finds the catalog item a connective phrase in `plain` refers to, e.g.
/// "Add-ons for your Margherita Pizza?". The longest item name matching at a
/// word boundary wins.
fn infer_item(plain: &str, snapshot: &DomainSnapshot) -> Option<String> {
    let mut best: Option<&str> = None;
    for caps in connective_regex().captures_iter(plain) {
        let phrase = caps
            .get(1)
            .expect("connective regex captures a phrase")
            .as_str()
            .to_lowercase();
        for item in &snapshot.items {
            let name = item.name.to_lowercase();
            if !phrase.starts_with(&name) {
                continue;
            }
            // Word boundary: the phrase either ends with the name or continues
            // with a space ("margherita pizza please").
            let boundary_ok = phrase.len() == name.len()
                || phrase[name.len()..].starts_with(' ');
            if !boundary_ok {
                continue;
            }
            if best.map_or(true, |b| item.name.len() > b.len()) {
                best = Some(&item.name);
            }
        }
    }
    best.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dinebot_core::{CatalogItem, DomainSnapshot};
    use protocol::parse;

    fn snapshot() -> DomainSnapshot {
        DomainSnapshot {
            items: vec![
                CatalogItem {
                    name: "Margherita Pizza".to_string(),
                    price: None,
                    category: None,
                    description: None,
                },
                CatalogItem {
                    name: "Margherita".to_string(),
                    price: None,
                    category: None,
                    description: None,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn infers_item_from_connective_phrase() {
        let mut tracker = CustomizationTracker::new();
        let parsed = parse("Add-ons for your Margherita Pizza? [ADDON:Extra Cheese]");
        tracker.observe(&parsed, &snapshot(), None);
        assert_eq!(tracker.active_item(), Some("Margherita Pizza"));
    }

    #[test]
    fn falls_back_to_last_user_turn() {
        let mut tracker = CustomizationTracker::new();
        let parsed = parse("Any extras? [ADDON:Extra Cheese]");
        tracker.observe(&parsed, &snapshot(), Some("Margherita Pizza"));
        assert_eq!(tracker.active_item(), Some("Margherita Pizza"));
    }

    #[test]
    fn chip_only_responses_do_not_touch_the_slot() {
        let mut tracker = CustomizationTracker::new();
        let parsed = parse("Anything else? [CHIP:No thanks]");
        tracker.observe(&parsed, &snapshot(), Some("Margherita Pizza"));
        assert_eq!(tracker.active_item(), None);
    }

    #[test]
    fn compose_clears_the_slot() {
        let mut tracker = CustomizationTracker::new();
        let parsed = parse("Extras? [ADDON:Extra Cheese]");
        tracker.observe(&parsed, &snapshot(), Some("Margherita Pizza"));

        let composed = tracker.compose("Extra Cheese");
        assert_eq!(
            composed.as_deref(),
            Some("Add Margherita Pizza with Extra Cheese")
        );
        assert_eq!(tracker.active_item(), None);
        assert_eq!(tracker.compose("Olives"), None);
    }

    #[test]
    fn slot_is_last_write_wins() {
        let mut tracker = CustomizationTracker::new();
        tracker.observe(
            &parse("Extras? [ADDON:Cheese]"),
            &snapshot(),
            Some("Margherita Pizza"),
        );
        tracker.observe(
            &parse("Toppings for your Margherita? [MODIFIER:No Basil]"),
            &snapshot(),
            Some("ignored"),
        );
        assert_eq!(tracker.active_item(), Some("Margherita"));
    }
}
