//! Value types for CP2K documents.
//!
//! A parsed input is a tree of four kinds of node:
//!
//! - [`Value::Scalar`]: a keyword value (integer, float or string),
//! - [`Value::Block`]: one `&SECTION ... &END` region,
//! - [`Value::List`]: what a section key turns into once it repeats,
//! - [`Value::Coord`]: the verbatim body of the coordinate section.

use serde::ser::{Serialize, SerializeMap, Serializer};

use cp2k_parse::{Scalar, Span};

/// Key under which the coordinate section is stored in its parent.
pub const COORD_KEY: &str = "coord";

/// Key under which a coordinate block exposes its lines.
pub const COORD_LINES_KEY: &str = "_1";

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Keyword value.
    Scalar(Scalar),
    /// Section.
    Block(Block),
    /// Repeated section key, in order of appearance.
    List(Vec<Value>),
    /// Coordinate section.
    Coord(CoordBlock),
}

/// A section: keys in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Entries in the block.
    pub entries: Vec<Entry>,
    /// Source span from header to terminator (None for the root, or if
    /// programmatically constructed).
    pub span: Option<Span>,
}

/// An entry in a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The normalized key.
    pub key: String,
    /// The value.
    pub value: Value,
}

/// Raw lines of the coordinate section, stored verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordBlock {
    /// One string per line, sanitized but otherwise untouched.
    pub lines: Vec<String>,
    /// Source span from header to terminator.
    pub span: Option<Span>,
}

impl Value {
    /// Create an empty block value.
    pub fn block() -> Self {
        Value::Block(Block::new())
    }

    /// Get as scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get as string (for values that stayed strings).
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Get as integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    /// Get as float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    /// Get as block.
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(b) => Some(b),
            _ => None,
        }
    }

    /// Get as mutable block.
    pub fn as_block_mut(&mut self) -> Option<&mut Block> {
        match self {
            Value::Block(b) => Some(b),
            _ => None,
        }
    }

    /// Get as list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as coordinate block.
    pub fn as_coord(&self) -> Option<&CoordBlock> {
        match self {
            Value::Coord(c) => Some(c),
            _ => None,
        }
    }

    /// Check if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Iterate over the blocks stored under one key, whether it repeated
    /// or not. Non-block list elements are skipped.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        let items: &[Value] = match self {
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        };
        items.iter().filter_map(Value::as_block)
    }

    /// Get a value by path.
    ///
    /// Path segments are separated by `.`.
    /// Use `[n]` to index into a repeated section.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);

        let value = match self {
            Value::Block(block) => block.get(segment)?,
            Value::List(items) => {
                let idx: usize = segment.strip_prefix('[')?.strip_suffix(']')?.parse().ok()?;
                items.get(idx)?
            }
            _ => return None,
        };
        value.get(rest)
    }

    /// Get a mutable value by path.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);

        let value = match self {
            Value::Block(block) => block.get_mut(segment)?,
            Value::List(items) => {
                let idx: usize = segment.strip_prefix('[')?.strip_suffix(']')?.parse().ok()?;
                items.get_mut(idx)?
            }
            _ => return None,
        };
        value.get_mut(rest)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Block> for Value {
    fn from(b: Block) -> Self {
        Value::Block(b)
    }
}

impl From<CoordBlock> for Value {
    fn from(c: CoordBlock) -> Self {
        Value::Coord(c)
    }
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get entry value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// Get mutable entry value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Iterate over entries as (key, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Check if key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite an entry. An overwritten entry keeps its
    /// position. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].value, value)),
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }

    /// Insert a value under a key that may repeat.
    ///
    /// The first value is stored as-is. The second turns the entry into a
    /// two-element list `[first, second]`; later ones are appended. Once a
    /// list, always a list.
    pub fn insert_repeated(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let Some(idx) = self.position(&key) else {
            self.entries.push(Entry { key, value });
            return;
        };
        let slot = &mut self.entries[idx].value;
        match slot {
            Value::List(items) => items.push(value),
            _ => {
                let first = std::mem::replace(slot, Value::List(Vec::new()));
                *slot = Value::List(vec![first, value]);
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }
}

impl Drop for Block {
    // Nested blocks are torn down from a worklist, not recursively.
    fn drop(&mut self) {
        if self.entries.iter().all(|e| matches!(e.value, Value::Scalar(_) | Value::Coord(_))) {
            return;
        }
        let mut pending: Vec<Value> = self.entries.drain(..).map(|e| e.value).collect();
        while let Some(value) = pending.pop() {
            match value {
                Value::Block(mut block) => {
                    pending.extend(block.entries.drain(..).map(|e| e.value));
                }
                Value::List(items) => pending.extend(items),
                Value::Scalar(_) | Value::Coord(_) => {}
            }
        }
    }
}

impl CoordBlock {
    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines were captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split off the first path segment. `[n]` index segments are their own
/// segment.
pub(crate) fn split_path(path: &str) -> (&str, &str) {
    if path.starts_with('[')
        && let Some(end) = path.find(']')
    {
        let segment = &path[..=end];
        let rest = &path[end + 1..];
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        return (segment, rest);
    }

    let dot_pos = path.find('.');
    let bracket_pos = path.find('[');

    match (dot_pos, bracket_pos) {
        (Some(d), Some(b)) if b < d => (&path[..b], &path[b..]),
        (Some(d), _) => (&path[..d], &path[d + 1..]),
        (None, Some(b)) => (&path[..b], &path[b..]),
        (None, None) => (path, ""),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(Scalar::Integer(i)) => serializer.serialize_i64(*i),
            Value::Scalar(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Value::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            Value::Block(block) => block.serialize(serializer),
            Value::List(items) => serializer.collect_seq(items),
            Value::Coord(coord) => coord.serialize(serializer),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}

impl Serialize for CoordBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(COORD_LINES_KEY, &self.lines)?;
        map.end()
    }
}
