//! Classified input lines.

use crate::{Line, Scalar};

/// A sanitized line together with what it means.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'src> {
    /// The underlying line.
    pub line: Line<'src>,
    /// What the line is.
    pub kind: LexemeKind,
}

/// The role of one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LexemeKind {
    /// Nothing left after sanitizing.
    Blank,
    /// Opening line of the verbatim coordinate section (`&COORD`).
    CoordStart,
    /// Section header `&NAME [ARGS]`, with its normalized key.
    SectionStart {
        /// Normalized key (`&KIND C` becomes `kind C`).
        key: String,
    },
    /// Section terminator (any line starting with `&END`).
    SectionEnd,
    /// Keyword line.
    Entry {
        /// Lowercased keyword.
        key: String,
        /// Coerced value.
        value: Scalar,
    },
}

impl LexemeKind {
    /// Short name for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            LexemeKind::Blank => "blank",
            LexemeKind::CoordStart => "coordinate header",
            LexemeKind::SectionStart { .. } => "section header",
            LexemeKind::SectionEnd => "terminator",
            LexemeKind::Entry { .. } => "keyword",
        }
    }
}
