//! Diagnostic rendering for structural errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use cp2k_parse::Span;

/// What is wrong with the nesting of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// `&END` with no open section to close.
    UnmatchedTerminator,
    /// Section still open at end of input.
    UnclosedSection {
        /// Normalized key of the section.
        key: String,
    },
    /// Coordinate section still open at end of input.
    UnclosedCoord,
}

/// A structural error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: StructuralError,
    /// Source location of the offending line.
    pub span: Span,
    /// 1-based line number of the offending line.
    pub line: u32,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: StructuralError, span: Span, line: u32) -> Self {
        Self { kind, span, line }
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        match &self.kind {
            StructuralError::UnmatchedTerminator => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("unmatched `&END`")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("no open section to close")
                            .with_color(Color::Red),
                    )
                    .with_help("remove this line or add the missing section header")
            }

            StructuralError::UnclosedSection { key } => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("unclosed section `{key}`"))
                    .with_label(
                        Label::new((filename, range))
                            .with_message("section opened here")
                            .with_color(Color::Red),
                    )
                    .with_help("add a closing `&END`")
            }

            StructuralError::UnclosedCoord => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("unclosed coordinate section")
                    .with_label(
                        Label::new((filename, range))
                            .with_message("coordinates start here")
                            .with_color(Color::Red),
                    )
                    .with_help("end the coordinates with a bare `&END` line")
            }
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StructuralError::UnmatchedTerminator => write!(f, "unmatched `&END`"),
            StructuralError::UnclosedSection { key } => write!(f, "unclosed section `{key}`"),
            StructuralError::UnclosedCoord => write!(f, "unclosed coordinate section"),
        }?;
        write!(f, " on line {}", self.line)
    }
}

impl std::error::Error for ParseError {}
