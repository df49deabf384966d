//! Parse options.

use crate::Separator;

/// Options controlling how CP2K input is lexed and built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Separator between a key and its value (default: any whitespace).
    pub separator: Separator,

    /// Header that opens the verbatim coordinate section (default: `&COORD`).
    /// Compared case-insensitively against the whole line.
    pub coord_section: String,

    /// Treat end of input as closing every open section (default: false).
    /// When off, an unterminated section is an error.
    pub close_at_eof: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Whitespace,
            coord_section: "&COORD".to_string(),
            close_at_eof: false,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split keys from values on exactly one `sep` character.
    pub fn strict_separator(mut self, sep: char) -> Self {
        self.separator = Separator::Char(sep);
        self
    }

    /// Set the key/value separator.
    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Set the header of the verbatim coordinate section.
    pub fn coord_section(mut self, header: impl Into<String>) -> Self {
        self.coord_section = header.into();
        self
    }

    /// Let end of input close all open sections instead of failing.
    pub fn close_at_eof(mut self, close: bool) -> Self {
        self.close_at_eof = close;
        self
    }
}
