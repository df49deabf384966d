//! Lexing layer for CP2K input files.
//!
//! Sits between the line sanitizer in `cp2k-tokenizer` and the tree builder
//! in `cp2k-tree`:
//!
//! - [`split`] normalizes keys and separates them from their values,
//! - [`coerce`] turns value strings into integers, floats or strings,
//! - [`Lexer`] classifies every sanitized line as a section header,
//!   terminator, coordinate header or keyword entry.

pub use cp2k_tokenizer::{Line, Sanitizer, Span};

pub mod coerce;
pub use coerce::{Scalar, coerce_value, to_float, to_int};

pub mod split;
pub use split::{
    Separator, header_key, header_key_with, parse_multi_key, parse_multi_key_with, split_entry,
    split_entry_with, split_line, split_line_with,
};

mod options;
pub use options::ParseOptions;

mod lexeme;
pub use lexeme::{Lexeme, LexemeKind};

mod lexer;
pub use lexer::Lexer;
