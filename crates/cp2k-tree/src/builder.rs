//! Tree builder over classified lines.
//!
//! Open sections live on an explicit stack of frames. A header pushes a
//! frame, the matching `&END` pops it and attaches the finished block to
//! the frame below (or the root), so nesting depth is bounded by memory
//! rather than by the call stack.

use cp2k_parse::{LexemeKind, Lexer, ParseOptions, Span};
use tracing::debug;

use crate::diagnostic::{ParseError, StructuralError};
use crate::value::{Block, COORD_KEY, CoordBlock, Value};

/// A section whose terminator has not been seen yet.
struct Frame {
    key: String,
    block: Block,
    header: Span,
    line: u32,
}

/// The root block plus the chain of open sections below it.
#[derive(Default)]
struct Stack {
    root: Block,
    open: Vec<Frame>,
}

impl Stack {
    /// The block new entries go into.
    fn current(&mut self) -> &mut Block {
        match self.open.last_mut() {
            Some(frame) => &mut frame.block,
            None => &mut self.root,
        }
    }

    fn push(&mut self, key: String, header: Span, line: u32) {
        debug!(key = %key, depth = self.open.len() + 1, line, "open section");
        self.open.push(Frame {
            key,
            block: Block::new(),
            header,
            line,
        });
    }

    /// Pop the innermost section, give it `end` as its closing span and
    /// attach it to its parent. Returns `false` if nothing was open.
    fn close(&mut self, end: Span) -> bool {
        let Some(mut frame) = self.open.pop() else {
            return false;
        };
        frame.block.span = Some(frame.header.to(end));
        debug!(key = %frame.key, entries = frame.block.len(), "close section");

        let parent = self.current();
        if parent.get(&frame.key).is_some_and(|v| !v.is_list()) {
            debug!(key = %frame.key, "repeated section, promoting to list");
        }
        parent.insert_repeated(frame.key, Value::Block(frame.block));
        true
    }
}

/// Builder that constructs a tree from the lines of a CP2K input.
pub struct TreeBuilder<'src> {
    lexer: Lexer<'src>,
}

impl<'src> TreeBuilder<'src> {
    /// Create a new tree builder with default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    /// Create a new tree builder with the given options.
    pub fn with_options(source: &'src str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::with_options(source, options),
        }
    }

    /// Consume the whole input and return the root block.
    pub fn build(mut self) -> Result<Block, ParseError> {
        let mut stack = Stack::default();

        while let Some(lexeme) = self.lexer.next_lexeme() {
            let line = lexeme.line;
            match lexeme.kind {
                LexemeKind::Blank => {}
                LexemeKind::CoordStart => {
                    let coord = self.capture_coord(line.span, line.number)?;
                    stack.current().insert(COORD_KEY, Value::Coord(coord));
                }
                LexemeKind::SectionStart { key } => stack.push(key, line.span, line.number),
                LexemeKind::Entry { key, value } => {
                    stack.current().insert(key, Value::Scalar(value));
                }
                LexemeKind::SectionEnd => {
                    if !stack.close(line.span) {
                        return Err(ParseError::new(
                            StructuralError::UnmatchedTerminator,
                            line.span,
                            line.number,
                        ));
                    }
                }
            }
        }

        if let Some(frame) = stack.open.last() {
            if !self.lexer.options().close_at_eof {
                return Err(ParseError::new(
                    StructuralError::UnclosedSection {
                        key: frame.key.clone(),
                    },
                    frame.header,
                    frame.line,
                ));
            }
            debug!(open = stack.open.len(), "end of input closes sections");
            let end = Span::empty(self.lexer.position());
            while stack.close(end) {}
        }

        Ok(stack.root)
    }

    /// Collect raw lines up to a bare terminator.
    fn capture_coord(&mut self, header: Span, line: u32) -> Result<CoordBlock, ParseError> {
        let mut coord = CoordBlock::default();
        loop {
            let Some(next) = self.lexer.next_line() else {
                return Err(ParseError::new(StructuralError::UnclosedCoord, header, line));
            };
            if self.lexer.ends_coord(&next) {
                coord.span = Some(header.to(next.span));
                break;
            }
            coord.lines.push(next.text.into_owned());
        }
        debug!(lines = coord.len(), "captured coordinates");
        Ok(coord)
    }
}
