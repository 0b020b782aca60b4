//! Integration tests for [`protocol::parse`].
//!
//! Covers: option tag extraction with order and duplicates, link tag dedupe,
//! action tags, whitespace normalization after stripping, permissiveness toward
//! unrecognized brackets, and determinism (pure function).

use protocol::{parse, ActionKind, Directive, LinkKind, OptionKind};

/// **Test: every well-formed option tag yields one directive, in order.**
///
/// **Setup:** text with three option tags of different kinds.
/// **Action:** `parse(text)`.
/// **Expected:** three directives in appearance order with the right kinds and labels.
#[test]
fn option_tags_yield_directives_in_order() {
    let parsed = parse("Pick one: [CHIP:Margherita] [ADDON:Extra Cheese] [MODIFIER:No Onion]");

    assert_eq!(
        parsed.directives,
        vec![
            Directive::Option {
                kind: OptionKind::Selectable,
                label: "Margherita".to_string()
            },
            Directive::Option {
                kind: OptionKind::Addon,
                label: "Extra Cheese".to_string()
            },
            Directive::Option {
                kind: OptionKind::Modifier,
                label: "No Onion".to_string()
            },
        ]
    );
    assert_eq!(parsed.plain_text, "Pick one:");
}

/// **Test: duplicate option labels are preserved as separate directives.**
#[test]
fn duplicate_option_labels_are_preserved() {
    let parsed = parse("[CHIP:Yes] or [CHIP:Yes]");
    assert_eq!(parsed.directives.len(), 2);
    assert_eq!(parsed.plain_text, "or");
}

/// **Test: N well-formed option tags produce exactly N directives.**
#[test]
fn directive_count_matches_tag_count() {
    let text = "a [CHIP:1] b [CHIP:2] c [ADDON:3] d [MODIFIER:4] e";
    let parsed = parse(text);
    assert_eq!(parsed.directives.len(), 4);
    assert_eq!(parsed.plain_text, "a b c d e");
}

/// **Test: repeated link tags of one family collapse to a single directive.**
///
/// **Setup:** two `[GOOGLE_REVIEW_LINK]` tags and one `[INSTAGRAM_LINK]`.
/// **Expected:** both google tags stripped from the text, one GoogleReview directive,
/// one Instagram directive.
#[test]
fn duplicate_link_tags_collapse_to_one() {
    let parsed =
        parse("Review us [GOOGLE_REVIEW_LINK] here [GOOGLE_REVIEW_LINK] [INSTAGRAM_LINK]");

    assert_eq!(
        parsed.directives,
        vec![
            Directive::Link(LinkKind::GoogleReview),
            Directive::Link(LinkKind::Instagram),
        ]
    );
    assert_eq!(parsed.plain_text, "Review us here");
}

/// **Test: action tags are recognized.**
#[test]
fn action_tags_are_recognized() {
    let parsed = parse("All set? [SUGGEST_FEEDBACK]");
    assert_eq!(
        parsed.directives,
        vec![Directive::Action(ActionKind::SuggestFeedback)]
    );

    let parsed = parse("Here's the order so far: 2x Pizza [CONFIRM_ORDER]");
    assert_eq!(
        parsed.directives,
        vec![Directive::Action(ActionKind::ConfirmOrder)]
    );
    assert_eq!(parsed.plain_text, "Here's the order so far: 2x Pizza");
}

/// **Test: stripping does not leave doubled whitespace.**
#[test]
fn stripping_normalizes_whitespace() {
    let parsed = parse("Would you like toppings? [CHIP:Yes] [CHIP:No]");
    assert_eq!(parsed.plain_text, "Would you like toppings?");

    let parsed = parse("Before [CHIP:Mid] after");
    assert_eq!(parsed.plain_text, "Before after");
}

/// **Test: newlines survive stripping; only in-line space runs collapse.**
#[test]
fn newlines_are_preserved() {
    let parsed = parse("Here's the order so far:\n2x Pizza\n1x Coke [CONFIRM_ORDER]");
    assert_eq!(parsed.plain_text, "Here's the order so far:\n2x Pizza\n1x Coke");
}

/// **Test: unrecognized bracket sequences are left untouched.**
///
/// **Setup:** free-form text containing unknown brackets and a malformed option tag.
/// **Expected:** no directives; text unchanged apart from trimming.
#[test]
fn unknown_brackets_are_literal_content() {
    let parsed = parse("Open daily [9am-11pm], see [MENU] or [chip:lowercase]");
    assert!(parsed.directives.is_empty());
    assert_eq!(
        parsed.plain_text,
        "Open daily [9am-11pm], see [MENU] or [chip:lowercase]"
    );
}

/// **Test: option tag with a blank label is treated as literal content.**
#[test]
fn blank_label_is_literal_content() {
    let parsed = parse("Choose [CHIP: ] something");
    assert!(parsed.directives.is_empty());
    assert_eq!(parsed.plain_text, "Choose [CHIP: ] something");
}

/// **Test: labels are trimmed but inner spaces are kept.**
#[test]
fn labels_are_trimmed() {
    let parsed = parse("[ADDON:  Extra Cheese ]");
    assert_eq!(
        parsed.directives,
        vec![Directive::Option {
            kind: OptionKind::Addon,
            label: "Extra Cheese".to_string()
        }]
    );
    assert_eq!(parsed.plain_text, "");
}

/// **Test: parsing is deterministic; same input, same output.**
#[test]
fn parse_is_idempotent_across_calls() {
    let text = "Hi [CHIP:One] [WEBSITE_LINK] mid [CONFIRM_ORDER] end";
    let first = parse(text);
    let second = parse(text);
    assert_eq!(first, second);
}

/// **Test: text with no tags passes through with only trimming.**
#[test]
fn plain_text_passes_through() {
    let parsed = parse("  Just a normal sentence.  ");
    assert!(parsed.directives.is_empty());
    assert_eq!(parsed.plain_text, "Just a normal sentence.");
}
