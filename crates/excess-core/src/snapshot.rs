//! Typed-tree snapshots
//!
//! A snapshot is how a host hands its typed syntax trees to the analyzer: a
//! JSON document holding one or more source units, each with its program and
//! the `TypeTable` that resolves the program's nodes.

use crate::ast::Program;
use crate::table::{TableError, TypeTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse snapshot: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid type table for {path}: {source}")]
    InvalidTable { path: PathBuf, source: TableError },
}

/// One analyzed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path of the original source file, used for reporting
    pub path: PathBuf,
    #[serde(default)]
    pub program: Program,
    #[serde(default)]
    pub types: TypeTable,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, program: Program, types: TypeTable) -> Self {
        Self {
            path: path.into(),
            program,
            types,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub units: Vec<SourceUnit>,
}

impl Snapshot {
    /// Load and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a snapshot document
    ///
    /// Accepts either `{ "units": [...] }` or a single bare unit.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let snapshot = if value.get("units").is_some() {
            serde_json::from_value(value)?
        } else {
            Snapshot {
                units: vec![serde_json::from_value(value)?],
            }
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        for unit in &self.units {
            unit.types
                .validate()
                .map_err(|source| SnapshotError::InvalidTable {
                    path: unit.path.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
