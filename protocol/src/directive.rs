//! Typed directives extracted from assistant text. Closed set: adding a new tag
//! kind is a one-place change here plus its tag name in the parser table.

/// Kind of a tappable option offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Plain quick-reply chip; the label is sent verbatim on tap.
    Selectable,
    /// Add-on for the item currently under customization.
    Addon,
    /// Modifier for the item currently under customization.
    Modifier,
}

/// External link families a business profile may configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    GoogleReview,
    Instagram,
    Whatsapp,
    Youtube,
    Website,
}

/// Sub-workflow invocations signaled by the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    SuggestFeedback,
    ConfirmOrder,
}

/// One parsed directive. Created while parsing a single response, consumed
/// immediately by the renderer, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `[CHIP:label]`, `[ADDON:label]`, `[MODIFIER:label]`.
    Option { kind: OptionKind, label: String },
    /// `[GOOGLE_REVIEW_LINK]` and friends; zero-argument.
    Link(LinkKind),
    /// `[SUGGEST_FEEDBACK]`, `[CONFIRM_ORDER]`; zero-argument.
    Action(ActionKind),
}

impl Directive {
    /// True for the option family (chip/addon/modifier).
    pub fn is_option(&self) -> bool {
        matches!(self, Directive::Option { .. })
    }
}
