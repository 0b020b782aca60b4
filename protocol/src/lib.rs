//! # protocol
//!
//! The bracket-tag mini-protocol embedded in assistant response text. Assistant
//! replies are free text that may carry directives such as `[CHIP:Yes]`,
//! `[GOOGLE_REVIEW_LINK]`, or `[CONFIRM_ORDER]`; [`parse`] splits a reply into
//! the plain-text remainder and an ordered list of typed [`Directive`] values.
//!
//! The parser is pure and deterministic: no side effects, same input always
//! yields the same output. Unrecognized bracket sequences are left in the text
//! verbatim; free-form text containing `[...]` is never an error.

mod directive;
mod parser;

pub use directive::{ActionKind, Directive, LinkKind, OptionKind};
pub use parser::{parse, Parsed};
