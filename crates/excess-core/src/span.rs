//! Source locations and node identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a syntax node, shared between the syntax tree and the type
/// oracle so a node can be resolved to its type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// A 1-based line/column position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

/// Source range of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a line/column
    pub fn at(line: usize, column: usize) -> Self {
        let pos = Position::new(line, column);
        Self { start: pos, end: pos }
    }
}

/// Nodes that carry an identity and a location
pub trait HasNode {
    fn node_id(&self) -> NodeId;
    fn span(&self) -> Span;
}
