//! excess-analyze: excess-property analysis over typed syntax trees
//!
//! A structural type checker only rejects excess properties on fresh object
//! literals. This crate re-checks the places where that check is lost:
//!
//! - annotated variable initializers
//! - call arguments (across every overload)
//! - function and lambda return values (awaited for async functions)
//! - JSX element attributes, spreads included
//!
//! # Example
//!
//! ```no_run
//! use excess_analyze::{output::OutputFormat, Analyzer, RuleOptions};
//! use std::path::Path;
//!
//! let analyzer = Analyzer::new(RuleOptions::recommended());
//! let report = analyzer.analyze_paths(&[Path::new("snapshots/")]).unwrap();
//! let output = excess_analyze::output::format_issues(&report.issues, OutputFormat::Table);
//! println!("{}", output);
//! ```

pub mod checks;
pub mod compare;
pub mod config;
pub mod issue;
pub mod logging;
pub mod output;

#[cfg(test)]
mod testing;

pub use compare::{Comparator, Verdict, Violation};
pub use config::{ConfigError, RuleOptions};
pub use issue::{FindingKind, Issue, IssueCollection, Severity};

use checks::{CheckContext, CheckRegistry};
use excess_core::ast::Program;
use excess_core::{Snapshot, SnapshotError, SourceUnit, TypeOracle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of typed-tree snapshot files
pub const SNAPSHOT_EXTENSION: &str = "json";

/// A snapshot file that could not be analyzed
#[derive(Debug)]
pub struct SkippedSnapshot {
    pub path: PathBuf,
    pub error: AnalyzeError,
}

/// Outcome of analyzing a set of snapshot files
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub issues: IssueCollection,
    pub skipped: Vec<SkippedSnapshot>,
    /// Snapshot files read successfully
    pub files: usize,
}

/// Main analyzer that runs the excess-property checks
pub struct Analyzer {
    options: RuleOptions,
    registry: CheckRegistry,
    exclude: Vec<glob::Pattern>,
    severity: Severity,
}

impl Analyzer {
    /// Create a new analyzer with the given rule options
    pub fn new(options: RuleOptions) -> Self {
        Self {
            options,
            registry: CheckRegistry::with_builtin_checks(),
            exclude: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Create analyzer with default options
    pub fn with_defaults() -> Self {
        Self::new(RuleOptions::default())
    }

    /// Skip snapshot files and source units whose path matches a glob
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self, AnalyzeError> {
        for pattern in patterns {
            let compiled = glob::Pattern::new(pattern)
                .map_err(|e| AnalyzeError::InvalidPattern(pattern.clone(), e.msg.to_string()))?;
            self.exclude.push(compiled);
        }
        Ok(self)
    }

    /// Severity attached to every finding
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Get the current rule options
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(path))
    }

    /// Run every enabled check over one program
    pub fn analyze_program(
        &self,
        path: &Path,
        program: &Program,
        oracle: &dyn TypeOracle,
    ) -> IssueCollection {
        let checks = self.registry.enabled_checks(&self.options);
        if logging::is_enabled() {
            let ids: Vec<_> = checks.iter().map(|c| c.id()).collect();
            logging::log_unit_start(path, &ids);
        }

        let mut ctx = CheckContext::new(path, &self.options, oracle);
        let mut issues = IssueCollection::new();
        for check in checks {
            for issue in check.check(program, &mut ctx) {
                let issue = issue.with_severity(self.severity);
                logging::log_finding(&issue);
                issues.add(issue);
            }
        }
        logging::log_cache_stats(path, ctx.comparator.stats());

        issues.sort();
        issues
    }

    /// Analyze one typed source unit
    pub fn analyze_unit(&self, unit: &SourceUnit) -> IssueCollection {
        self.analyze_program(&unit.path, &unit.program, &unit.types)
    }

    /// Analyze every unit of a snapshot in parallel
    pub fn analyze_snapshot(&self, snapshot: &Snapshot) -> IssueCollection {
        let results: Vec<IssueCollection> = snapshot
            .units
            .par_iter()
            .filter(|unit| !self.is_excluded(&unit.path))
            .map(|unit| self.analyze_unit(unit))
            .collect();

        let mut combined = IssueCollection::new();
        for issues in results {
            combined.extend(issues.into_issues());
        }
        combined.sort();
        combined
    }

    /// Analyze a single snapshot file
    pub fn analyze_file(&self, path: &Path) -> Result<IssueCollection, AnalyzeError> {
        let snapshot = Snapshot::load(path)?;
        Ok(self.analyze_snapshot(&snapshot))
    }

    /// Analyze snapshot files, or directories holding them
    pub fn analyze_paths(&self, paths: &[&Path]) -> Result<AnalysisReport, AnalyzeError> {
        if paths.is_empty() {
            return Err(AnalyzeError::NoPaths);
        }

        let files = self.collect_snapshot_files(paths)?;
        logging::log_analysis_start(files.len());

        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file, self.analyze_file(file)))
            .collect();

        let mut report = AnalysisReport::default();
        for (file, result) in results {
            match result {
                Ok(issues) => {
                    report.files += 1;
                    report.issues.extend(issues.into_issues());
                }
                Err(error) => {
                    logging::log_snapshot_skipped(file, &error.to_string());
                    report.skipped.push(SkippedSnapshot {
                        path: file.clone(),
                        error,
                    });
                }
            }
        }

        report.issues.sort();
        logging::log_analysis_complete(report.issues.len(), report.skipped.len());
        Ok(report)
    }

    fn collect_snapshot_files(&self, paths: &[&Path]) -> Result<Vec<PathBuf>, AnalyzeError> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file()
                        && entry_path
                            .extension()
                            .is_some_and(|e| e == SNAPSHOT_EXTENSION)
                        && !self.is_excluded(entry_path)
                    {
                        files.push(entry_path.to_path_buf());
                    }
                }
            } else {
                return Err(AnalyzeError::PathNotFound(path.to_path_buf()));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Errors that can occur during analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No paths given for analysis")]
    NoPaths,

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Invalid exclude pattern '{0}': {1}")]
    InvalidPattern(String, String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

#[cfg(test)]
mod tests;
