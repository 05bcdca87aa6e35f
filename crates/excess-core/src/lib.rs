//! excess-core: host-facing abstractions for excess-property analysis
//!
//! This crate provides:
//! - `ast`: the closed syntax model the checks walk
//! - `Visitor`: trait for traversing a `Program`
//! - `collect_returns()`: return statements of one function scope
//! - `TypeOracle`: the read-only type-checker contract, addressed by `TypeId`
//! - `TypeTable`: an in-memory oracle that hosts can serialize
//! - `Snapshot`: typed source units exchanged as JSON

pub mod ast;
pub mod oracle;
mod returns;
pub mod snapshot;
pub mod span;
pub mod table;
pub mod visitor;

pub use oracle::{
    IndexKind, IndexSignature, Property, Signature, TypeCategory, TypeId, TypeOracle, Visibility,
};
pub use returns::collect_returns;
pub use snapshot::{Snapshot, SnapshotError, SourceUnit};
pub use span::{HasNode, NodeId, Position, Span};
pub use table::{ObjectShape, TableError, TypeData, TypeKind, TypeTable};
pub use visitor::{visit, Visitor};
