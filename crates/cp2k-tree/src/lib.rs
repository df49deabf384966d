#![doc = include_str!("../README.md")]
//! Document tree representation for CP2K input files.
//!
//! This crate provides a high-level API for working with CP2K inputs,
//! including parsing, accessing values by path, and serialization.

use std::path::Path;

use tracing::debug;

mod builder;
mod diagnostic;
mod error;
mod value;

pub use builder::TreeBuilder;
pub use cp2k_parse::{ParseOptions, Scalar, Separator, Span};
pub use diagnostic::{ParseError, StructuralError};
pub use error::Error;
pub use value::{Block, COORD_KEY, COORD_LINES_KEY, CoordBlock, Entry, Value};

/// Parse a CP2K input into its root block.
pub fn parse(source: &str) -> Result<Block, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse a CP2K input with the given options.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Block, ParseError> {
    debug!(bytes = source.len(), "parsing");
    let root = TreeBuilder::with_options(source, options.clone()).build()?;
    debug!(entries = root.len(), "parsed");
    Ok(root)
}

/// Read and parse a CP2K input file.
pub fn read_input(path: impl AsRef<Path>) -> Result<Document, Error> {
    read_input_with(path, &ParseOptions::default())
}

/// Read and parse a CP2K input file with the given options.
pub fn read_input_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Document, Error> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading input");
    let source = std::fs::read_to_string(path)?;
    Ok(Document::parse_with(&source, options)?)
}

/// A parsed CP2K input (root is always an implicit block).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// The root block.
    pub root: Block,
}

impl Document {
    /// Parse a CP2K input.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Parse a CP2K input with the given options.
    pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        Ok(Document {
            root: parse_with(source, options)?,
        })
    }

    /// Get a value by path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }

        let (segment, rest) = value::split_path(path);
        self.root.get(segment)?.get(rest)
    }

    /// Turn the document into a plain value.
    pub fn into_value(self) -> Value {
        Value::Block(self.root)
    }
}

impl serde::Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.root, serializer)
    }
}
