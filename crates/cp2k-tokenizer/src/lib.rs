//! Line sanitizer for CP2K input files.
//!
//! CP2K input is line oriented: every meaningful unit (section header,
//! terminator, keyword) occupies exactly one line. This crate turns raw
//! source text into an ordered sequence of sanitized [`Line`]s that the
//! parser consumes.

mod span;
pub use span::Span;

mod line;
pub use line::Line;

mod sanitizer;
pub use sanitizer::{Sanitizer, sanitize_line};
