//! Lexical extraction over raw HTML text.
//!
//! `scanner` is a lightweight, non-validating tag scanner; `placeholder`
//! finds the data-binding markers that must survive an edit. Neither builds
//! a DOM.

pub mod placeholder;
pub mod scanner;

pub use placeholder::extract_placeholders;
pub use scanner::{scan_tags, Attr, Tag};
