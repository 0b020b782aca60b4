//! Tokenizer for the bracket-tag protocol.
//!
//! A single regex scans the text left to right; every recognized tag is stripped
//! from the remainder and mapped to a [`Directive`]. Option tags preserve order
//! and duplicates; link tags collapse to the first occurrence per family (later
//! duplicates are stripped without producing another directive).

use std::sync::OnceLock;

use regex::Regex;

use crate::directive::{ActionKind, Directive, LinkKind, OptionKind};

/// Result of parsing one assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Remainder after stripping recognized tags, whitespace-normalized and trimmed.
    pub plain_text: String,
    /// Directives in order of appearance.
    pub directives: Vec<Directive>,
}

impl Parsed {
    /// True when any directive is an addon or modifier option.
    pub fn has_customization_options(&self) -> bool {
        self.directives.iter().any(|d| {
            matches!(
                d,
                Directive::Option {
                    kind: OptionKind::Addon | OptionKind::Modifier,
                    ..
                }
            )
        })
    }
}

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(
            r"\[(?:(CHIP|ADDON|MODIFIER):([^\[\]]+)|(GOOGLE_REVIEW_LINK|INSTAGRAM_LINK|WHATSAPP_LINK|YOUTUBE_LINK|WEBSITE_LINK|SUGGEST_FEEDBACK|CONFIRM_ORDER))\]",
        )
        .expect("tag regex is valid")
    })
}

/// Splits raw assistant text into the plain-text remainder and its directives.
///
/// Pure function: no side effects, deterministic. Unrecognized bracket
/// sequences (including option tags with a blank label) stay in the remainder
/// untouched.
pub fn parse(text: &str) -> Parsed {
    let re = tag_regex();
    let mut directives = Vec::new();
    let mut seen_links: Vec<LinkKind> = Vec::new();
    let mut plain = String::with_capacity(text.len());
    let mut last_end = 0;

    for caps in re.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always present");

        let directive = if let Some(tag) = caps.get(1) {
            let label = caps
                .get(2)
                .expect("option tag carries a label group")
                .as_str()
                .trim();
            if label.is_empty() {
                // Blank label: treat the whole tag as literal content.
                None
            } else {
                let kind = match tag.as_str() {
                    "CHIP" => OptionKind::Selectable,
                    "ADDON" => OptionKind::Addon,
                    _ => OptionKind::Modifier,
                };
                Some(Directive::Option {
                    kind,
                    label: label.to_string(),
                })
            }
        } else {
            match caps.get(3).expect("zero-arg tag group").as_str() {
                "GOOGLE_REVIEW_LINK" => Some(Directive::Link(LinkKind::GoogleReview)),
                "INSTAGRAM_LINK" => Some(Directive::Link(LinkKind::Instagram)),
                "WHATSAPP_LINK" => Some(Directive::Link(LinkKind::Whatsapp)),
                "YOUTUBE_LINK" => Some(Directive::Link(LinkKind::Youtube)),
                "WEBSITE_LINK" => Some(Directive::Link(LinkKind::Website)),
                "SUGGEST_FEEDBACK" => Some(Directive::Action(ActionKind::SuggestFeedback)),
                _ => Some(Directive::Action(ActionKind::ConfirmOrder)),
            }
        };

        match directive {
            Some(directive) => {
                plain.push_str(&text[last_end..whole.start()]);
                last_end = whole.end();
                match directive {
                    Directive::Link(kind) => {
                        // First occurrence per family wins; duplicates are stripped only.
                        if !seen_links.contains(&kind) {
                            seen_links.push(kind);
                            directives.push(Directive::Link(kind));
                        }
                    }
                    other => directives.push(other),
                }
            }
            None => {
                // Leave the literal bracket sequence in the remainder.
            }
        }
    }
    plain.push_str(&text[last_end..]);

    Parsed {
        plain_text: normalize_whitespace(&plain),
        directives,
    }
}

/// Collapses space runs left behind by tag stripping and trims the result.
/// Newlines are preserved; only spaces and tabs within a line are collapsed.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut prev_blank = false;
        for ch in line.chars() {
            if ch == ' ' || ch == '\t' {
                if !prev_blank {
                    out.push(' ');
                }
                prev_blank = true;
            } else {
                out.push(ch);
                prev_blank = false;
            }
        }
        while out.ends_with(' ') {
            out.pop();
        }
    }
    out.trim().to_string()
}
