//! Key normalization and key/value splitting.
//!
//! CP2K keywords are case-insensitive, so keys are folded to lowercase.
//! Section headers may carry arguments (`&KIND C`); those become part of the
//! key, with only the section name folded (`kind C`), so that sections with
//! different arguments stay distinct.

/// What separates a key from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Any run of whitespace. Runs are collapsed.
    #[default]
    Whitespace,
    /// Exactly one occurrence of the given character. Repeated occurrences
    /// are not collapsed, so `"A  B"` splits into `"A"` and `" B"`.
    Char(char),
}

impl Separator {
    /// A single space in strict mode.
    pub const SPACE: Separator = Separator::Char(' ');

    /// The character used when re-joining split pieces.
    fn joiner(self) -> char {
        match self {
            Separator::Whitespace => ' ',
            Separator::Char(sep) => sep,
        }
    }

    /// Strip surrounding whitespace in whitespace mode; strict mode keeps
    /// the input untouched.
    fn trim(self, s: &str) -> &str {
        match self {
            Separator::Whitespace => s.trim(),
            Separator::Char(_) => s,
        }
    }

    /// Split `s` once at its first separator.
    pub fn split_first(self, s: &str) -> Option<(&str, &str)> {
        match self {
            Separator::Whitespace => {
                let s = s.trim();
                let idx = s.find(char::is_whitespace)?;
                Some((&s[..idx], s[idx..].trim_start()))
            }
            Separator::Char(sep) => s.split_once(sep),
        }
    }

    /// Split `s` once at its last separator.
    pub fn split_last(self, s: &str) -> Option<(&str, &str)> {
        match self {
            Separator::Whitespace => {
                let s = s.trim();
                let idx = s.rfind(char::is_whitespace)?;
                let ws_len = s[idx..].chars().next().map_or(1, char::len_utf8);
                Some((s[..idx].trim_end(), &s[idx + ws_len..]))
            }
            Separator::Char(sep) => s.rsplit_once(sep),
        }
    }
}

/// Split a line into a normalized key and the value that follows its last
/// separator, using [`Separator::Whitespace`].
///
/// Everything before the last separator is the key. A multi-word key keeps
/// its case from the second word on (see [`parse_multi_key`]).
///
/// ```
/// use cp2k_parse::split_line;
///
/// assert_eq!(split_line("A"), ("a".to_string(), ""));
/// assert_eq!(split_line("A B"), ("a".to_string(), "B"));
/// assert_eq!(split_line("A B C"), ("a B".to_string(), "C"));
/// ```
pub fn split_line(line: &str) -> (String, &str) {
    split_line_with(line, Separator::Whitespace)
}

/// [`split_line`] with an explicit separator.
pub fn split_line_with(line: &str, sep: Separator) -> (String, &str) {
    match sep.split_last(line) {
        Some((key, value)) => {
            let key = parse_multi_key_with(key, sep).unwrap_or_else(|| key.to_lowercase());
            (key, value)
        }
        None => (sep.trim(line).to_lowercase(), ""),
    }
}

/// Split a keyword line at its first separator, using
/// [`Separator::Whitespace`].
///
/// This is the split applied to keyword lines inside sections: the keyword
/// is a single word and everything after it belongs to the value.
///
/// ```
/// use cp2k_parse::split_entry;
///
/// assert_eq!(split_entry("ATOMS CD CD"), ("atoms".to_string(), "CD CD"));
/// assert_eq!(split_entry("PRINT_LEVEL  LOW"), ("print_level".to_string(), "LOW"));
/// assert_eq!(split_entry("DO_NONBONDED"), ("do_nonbonded".to_string(), ""));
/// ```
pub fn split_entry(line: &str) -> (String, &str) {
    split_entry_with(line, Separator::Whitespace)
}

/// [`split_entry`] with an explicit separator.
pub fn split_entry_with(line: &str, sep: Separator) -> (String, &str) {
    match sep.split_first(line) {
        Some((key, value)) => (key.to_lowercase(), value),
        None => (sep.trim(line).to_lowercase(), ""),
    }
}

/// Normalize a key made of several words, using [`Separator::Whitespace`].
///
/// The first word loses any leading `&` and is lowercased; the rest is kept
/// as-is. Returns `None` if `item` is a single word.
///
/// ```
/// use cp2k_parse::parse_multi_key;
///
/// assert_eq!(parse_multi_key("A B").as_deref(), Some("a B"));
/// assert_eq!(parse_multi_key("&KIND  Cd").as_deref(), Some("kind Cd"));
/// assert_eq!(parse_multi_key("A"), None);
/// ```
pub fn parse_multi_key(item: &str) -> Option<String> {
    parse_multi_key_with(item, Separator::Whitespace)
}

/// [`parse_multi_key`] with an explicit separator.
pub fn parse_multi_key_with(item: &str, sep: Separator) -> Option<String> {
    let (first, rest) = sep.split_first(item)?;
    let mut key = first.trim_start_matches('&').to_lowercase();
    key.push(sep.joiner());
    key.push_str(rest);
    Some(key)
}

/// Normalize a section header line into a key, using
/// [`Separator::Whitespace`].
///
/// ```
/// use cp2k_parse::header_key;
///
/// assert_eq!(header_key("&FORCE_EVAL"), "force_eval");
/// assert_eq!(header_key("&KIND  C"), "kind C");
/// assert_eq!(header_key("&XC_FUNCTIONAL PBE"), "xc_functional PBE");
/// ```
pub fn header_key(line: &str) -> String {
    header_key_with(line, Separator::Whitespace)
}

/// [`header_key`] with an explicit separator.
pub fn header_key_with(line: &str, sep: Separator) -> String {
    parse_multi_key_with(line, sep)
        .unwrap_or_else(|| sep.trim(line).trim_start_matches('&').to_lowercase())
}
