//! Sanitized source lines.

use std::borrow::Cow;

use crate::Span;

/// One sanitized line of input.
///
/// `text` is borrowed from the source unless tab removal forced a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'src> {
    /// The sanitized text.
    pub text: Cow<'src, str>,
    /// Where the sanitized text sits in the source.
    pub span: Span,
    /// 1-based line number in the source.
    pub number: u32,
}

impl<'src> Line<'src> {
    /// Create a new line.
    pub fn new(text: impl Into<Cow<'src, str>>, span: Span, number: u32) -> Self {
        Self {
            text: text.into(),
            span,
            number,
        }
    }

    /// The sanitized text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether sanitizing left nothing behind (a whitespace-only line).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Case-insensitive (ASCII) equality with `other`.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    /// Case-insensitive (ASCII) prefix test.
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }

    /// Detach the line from the source buffer.
    pub fn into_owned(self) -> Line<'static> {
        Line {
            text: Cow::Owned(self.text.into_owned()),
            span: self.span,
            number: self.number,
        }
    }
}
