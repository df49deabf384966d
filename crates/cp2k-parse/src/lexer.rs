//! Line lexer for CP2K input.

use tracing::trace;

use crate::split::{header_key_with, split_entry_with};
use crate::{Lexeme, LexemeKind, Line, ParseOptions, Sanitizer, coerce_value};

/// Section terminator. Matched case-insensitively.
pub const TERMINATOR: &str = "&END";

/// Marks a section header.
const SECTION_SIGIL: char = '&';

/// A lexer that classifies the sanitized lines of a CP2K input.
///
/// Iterating yields one [`Lexeme`] per sanitized line. The coordinate
/// section is line oriented, so its body is pulled with
/// [`Lexer::next_line`] instead, which skips classification.
#[derive(Clone)]
pub struct Lexer<'src> {
    lines: Sanitizer<'src>,
    options: ParseOptions,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer with default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a new lexer with the given options.
    pub fn with_options(source: &'src str, options: ParseOptions) -> Self {
        Self {
            lines: Sanitizer::new(source),
            options,
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Current byte position in the source.
    #[inline]
    pub fn position(&self) -> u32 {
        self.lines.position()
    }

    /// Take the next sanitized line without classifying it.
    pub fn next_line(&mut self) -> Option<Line<'src>> {
        self.lines.next()
    }

    /// Whether `line` ends the coordinate section. Unlike section
    /// terminators, this must be the bare terminator.
    pub fn ends_coord(&self, line: &Line<'_>) -> bool {
        line.eq_ignore_case(TERMINATOR)
    }

    /// Classify one sanitized line.
    pub fn classify(&self, line: &Line<'_>) -> LexemeKind {
        let sep = self.options.separator;
        let text = line.as_str();

        if text.is_empty() {
            LexemeKind::Blank
        } else if line.eq_ignore_case(&self.options.coord_section) {
            LexemeKind::CoordStart
        } else if line.starts_with_ignore_case(TERMINATOR) {
            LexemeKind::SectionEnd
        } else if text.starts_with(SECTION_SIGIL) {
            LexemeKind::SectionStart {
                key: header_key_with(text, sep),
            }
        } else {
            let (key, value) = split_entry_with(text, sep);
            LexemeKind::Entry {
                key,
                value: coerce_value(value),
            }
        }
    }

    /// Get the next lexeme.
    pub fn next_lexeme(&mut self) -> Option<Lexeme<'src>> {
        let line = self.lines.next()?;
        let kind = self.classify(&line);
        trace!(line = line.number, kind = kind.name(), "lexeme");
        Some(Lexeme { line, kind })
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Lexeme<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_lexeme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scalar, Separator};

    fn kinds(source: &str) -> Vec<LexemeKind> {
        Lexer::new(source).map(|l| l.kind).collect()
    }

    fn section(key: &str) -> LexemeKind {
        LexemeKind::SectionStart {
            key: key.to_string(),
        }
    }

    fn entry(key: &str, value: impl Into<Scalar>) -> LexemeKind {
        LexemeKind::Entry {
            key: key.to_string(),
            value: value.into(),
        }
    }

    #[test]
    fn test_simple_section() {
        let source = "&MGRID\n  CUTOFF  400\n  NGRIDS 4\n&END\n";
        assert_eq!(
            kinds(source),
            vec![
                section("mgrid"),
                entry("cutoff", 400_i64),
                entry("ngrids", 4_i64),
                LexemeKind::SectionEnd,
            ]
        );
    }

    #[test]
    fn test_terminator_is_case_insensitive_prefix() {
        assert_eq!(
            kinds("&end\n&End DFT\n&ENDX"),
            vec![
                LexemeKind::SectionEnd,
                LexemeKind::SectionEnd,
                LexemeKind::SectionEnd
            ]
        );
    }

    #[test]
    fn test_short_sigil_lines_are_headers() {
        assert_eq!(kinds("&EN"), vec![section("en")]);
    }

    #[test]
    fn test_coord_header() {
        assert_eq!(
            kinds("&COORD\n&coord\n&COORD extra"),
            vec![
                LexemeKind::CoordStart,
                LexemeKind::CoordStart,
                section("coord extra"),
            ]
        );
    }

    #[test]
    fn test_custom_coord_header() {
        let options = ParseOptions::new().coord_section("&VELOCITY");
        let got: Vec<_> = Lexer::with_options("&VELOCITY\n&COORD", options)
            .map(|l| l.kind)
            .collect();
        assert_eq!(got, vec![LexemeKind::CoordStart, section("coord")]);
    }

    #[test]
    fn test_header_arguments_keep_case() {
        assert_eq!(kinds("&KIND  Cd"), vec![section("kind Cd")]);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(
            kinds("A 1\n   \nB 2.5"),
            vec![entry("a", 1_i64), LexemeKind::Blank, entry("b", 2.5_f64)]
        );
    }

    #[test]
    fn test_strict_separator() {
        let options = ParseOptions::new().separator(Separator::SPACE);
        let got: Vec<_> = Lexer::with_options("PROJECT  example", options)
            .map(|l| l.kind)
            .collect();
        assert_eq!(got, vec![entry("project", " example")]);
    }

    #[test]
    fn test_next_line_skips_classification() {
        let mut lexer = Lexer::new("&COORD\nCd 0.0 0.0 0.0\n&END");
        assert_eq!(lexer.next_lexeme().unwrap().kind, LexemeKind::CoordStart);
        let atom = lexer.next_line().unwrap();
        assert_eq!(atom.as_str(), "Cd 0.0 0.0 0.0");
        let end = lexer.next_line().unwrap();
        assert!(lexer.ends_coord(&end));
        assert!(lexer.next_line().is_none());
    }

    #[test]
    fn test_coord_needs_bare_terminator() {
        let lexer = Lexer::new("");
        assert!(lexer.ends_coord(&Line::new("&end", Default::default(), 1)));
        assert!(!lexer.ends_coord(&Line::new("&END COORD", Default::default(), 1)));
    }
}
