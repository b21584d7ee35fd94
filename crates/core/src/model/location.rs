use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

/// Byte and line extent of a node inside its file.
///
/// `begin..end` covers the whole declaration. `body_begin..body_end` covers the
/// part that carries the implementation (a function's block, a class body) and
/// equals `begin..end` when the declaration has no separable body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    #[serde(with = "crate::util::serde_arc_path")]
    pub file: Arc<Path>,
    pub line_start: usize,
    pub line_end: usize,
    pub begin: usize,
    pub end: usize,
    pub body_begin: usize,
    pub body_end: usize,
}

impl Location {
    pub fn new(
        file: impl Into<Arc<Path>>,
        line_start: usize,
        line_end: usize,
        begin: usize,
        end: usize,
    ) -> Self {
        Self {
            file: file.into(),
            line_start,
            line_end,
            begin,
            end,
            body_begin: begin,
            body_end: end,
        }
    }

    pub fn with_body(mut self, body_begin: usize, body_end: usize) -> Self {
        self.body_begin = body_begin;
        self.body_end = body_end;
        self
    }

    pub fn has_body(&self) -> bool {
        self.body_begin != self.begin
    }

    pub fn span(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub fn body_span(&self) -> Range<usize> {
        self.body_begin..self.body_end
    }
}

/// A lexical token as a byte range of its file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Offset-ordered token spans of one file. Only used for similarity scoring.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
    tokens: Vec<TokenSpan>,
}

impl TokenIndex {
    pub fn new(tokens: Vec<TokenSpan>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[TokenSpan] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens starting at or after `begin` and ending at or before `end`.
    ///
    /// Walks forward from the first token starting at `begin` and stops at the
    /// first token that ends past `end`.
    pub fn within(&self, begin: usize, end: usize) -> impl Iterator<Item = (usize, &TokenSpan)> {
        let first = self.tokens.partition_point(|t| t.start < begin);
        self.tokens[first..]
            .iter()
            .enumerate()
            .map(move |(i, t)| (first + i, t))
            .take_while(move |(_, t)| t.end <= end)
    }
}

impl From<Vec<TokenSpan>> for TokenIndex {
    fn from(tokens: Vec<TokenSpan>) -> Self {
        Self::new(tokens)
    }
}
