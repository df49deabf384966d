//! Line sanitizer.
//!
//! Splits source text into lines and cleans each one up:
//!
//! - lines that are empty in the source are dropped,
//! - trailing whitespace (including a `\r` left over from `\r\n`) is removed,
//! - every tab character is removed,
//! - leading spaces are removed.
//!
//! A line holding nothing but spaces is *not* dropped; it comes out as an
//! empty [`Line`]. Only lines that were blank in the source disappear.

use std::borrow::Cow;

use tracing::trace;

use crate::{Line, Span};

/// Sanitize a single raw line (without its line terminator).
///
/// ```
/// use cp2k_tokenizer::sanitize_line;
///
/// assert_eq!(sanitize_line("    CUTOFF  400   "), "CUTOFF  400");
/// assert_eq!(sanitize_line("\t&DFT"), "&DFT");
/// assert_eq!(sanitize_line("   "), "");
/// ```
pub fn sanitize_line(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim_end();
    if trimmed.contains('\t') {
        let without_tabs: String = trimmed.chars().filter(|&c| c != '\t').collect();
        Cow::Owned(without_tabs.trim_start_matches(' ').to_string())
    } else {
        Cow::Borrowed(trimmed.trim_start_matches(' '))
    }
}

/// Iterator over the sanitized lines of a source text.
#[derive(Clone)]
pub struct Sanitizer<'src> {
    /// The remaining source text (suffix of the original).
    remaining: &'src str,
    /// Byte offset of `remaining` in the original source.
    pos: u32,
    /// Number of raw lines consumed so far.
    line_number: u32,
}

impl<'src> Sanitizer<'src> {
    /// Create a new sanitizer over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            remaining: source,
            pos: 0,
            line_number: 0,
        }
    }

    /// Current byte position in the source.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Whether the whole source has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Take the next raw line (terminator excluded) and its start offset.
    fn next_raw(&mut self) -> Option<(&'src str, u32)> {
        if self.remaining.is_empty() {
            return None;
        }
        let start = self.pos;
        let (raw, consumed) = match self.remaining.find('\n') {
            Some(idx) => (&self.remaining[..idx], idx + 1),
            None => (self.remaining, self.remaining.len()),
        };
        self.remaining = &self.remaining[consumed..];
        self.pos += consumed as u32;
        self.line_number += 1;
        Some((raw, start))
    }
}

impl<'src> Iterator for Sanitizer<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (raw, start) = self.next_raw()?;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            if raw.is_empty() {
                trace!(line = self.line_number, "dropping blank line");
                continue;
            }

            let text = sanitize_line(raw);

            // Span of the surviving text inside the raw line. Tabs are
            // skipped on the left edge as well, since they never survive.
            let trimmed = raw.trim_end();
            let lead = trimmed.len() - trimmed.trim_start_matches([' ', '\t']).len();
            let span = if text.is_empty() {
                Span::empty(start)
            } else {
                Span::new(start + lead as u32, start + trimmed.len() as u32)
            };

            trace!(line = self.line_number, ?span, text = %text, "sanitized line");
            return Some(Line::new(text, span, self.line_number));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(source: &str) -> Vec<String> {
        Sanitizer::new(source).map(|l| l.text.into_owned()).collect()
    }

    #[test]
    fn test_strips_indentation_and_trailing_whitespace() {
        let source = "&GLOBAL\n    PROJECT  example   \n&END\n";
        assert_eq!(lines(source), vec!["&GLOBAL", "PROJECT  example", "&END"]);
    }

    #[test]
    fn test_drops_blank_lines() {
        let source = "&GLOBAL\n\n\n&END\n\n";
        assert_eq!(lines(source), vec!["&GLOBAL", "&END"]);
    }

    #[test]
    fn test_keeps_whitespace_only_lines_as_empty() {
        let source = "A 1\n    \nB 2";
        assert_eq!(lines(source), vec!["A 1", "", "B 2"]);
    }

    #[test]
    fn test_removes_tabs_everywhere() {
        assert_eq!(lines("\t\tKEY\tVALUE\t"), vec!["KEYVALUE"]);
        assert_eq!(lines(" \t PROJECT x"), vec!["PROJECT x"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "&GLOBAL\r\n\r\n  RUN_TYPE ENERGY\r\n&END\r\n";
        assert_eq!(lines(source), vec!["&GLOBAL", "RUN_TYPE ENERGY", "&END"]);
    }

    #[test]
    fn test_line_numbers_count_dropped_lines() {
        let numbers: Vec<u32> = Sanitizer::new("a\n\nb\n\n\nc").map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 3, 6]);
    }

    #[test]
    fn test_spans_point_at_sanitized_text() {
        let source = "&FORCE_EVAL\n    METHOD  FIST  \n&END";
        let spans: Vec<&str> = Sanitizer::new(source)
            .map(|l| l.span.slice(source))
            .collect();
        assert_eq!(spans, vec!["&FORCE_EVAL", "METHOD  FIST", "&END"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(lines("").is_empty());
        assert!(lines("\n\n").is_empty());
    }

    proptest! {
        #[test]
        fn sanitized_lines_have_no_tabs_or_edges(source in "[ \tA-Z&\n]{0,64}") {
            for line in Sanitizer::new(&source) {
                prop_assert!(!line.text.contains('\t'));
                prop_assert!(!line.text.contains('\n'));
                prop_assert!(!line.text.starts_with(' '));
                prop_assert!(!line.text.ends_with(' '));
            }
        }

        #[test]
        fn one_line_per_non_blank_raw_line(source in "[ A-Z\n]{0,64}") {
            let expected = source.split('\n').filter(|raw| !raw.is_empty()).count();
            prop_assert_eq!(Sanitizer::new(&source).count(), expected);
        }
    }
}
