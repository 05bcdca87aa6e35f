//! Issue/diagnostic types for analysis results

use crate::compare::Violation;
use excess_core::Span;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for issues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed
    #[default]
    Error,
    /// Warning - should be reviewed
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of value carried the excess property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Initializer, call argument or JSX attributes
    ExcessPropertyOnValue,
    /// Returned from a function whose return type does not declare it
    ExcessPropertyOnReturn,
}

impl FindingKind {
    /// Stable message identifier
    pub fn message_id(self) -> &'static str {
        match self {
            FindingKind::ExcessPropertyOnValue => "no-excess-property",
            FindingKind::ExcessPropertyOnReturn => "no-excess-property-func",
        }
    }

    pub fn message(self, data: &FindingData) -> String {
        let owner = match &data.owner_label {
            Some(owner) => format!(" '{}'", owner),
            None => String::new(),
        };
        match self {
            FindingKind::ExcessPropertyOnValue => format!(
                "Object has property '{}' that is not present in type{}",
                data.property_path, owner
            ),
            FindingKind::ExcessPropertyOnReturn => format!(
                "Returned object has property '{}' that is not present in return type{}",
                data.property_path, owner
            ),
        }
    }
}

/// Message data of one finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingData {
    pub property_path: String,
    /// Declared name of the type the property is missing from
    pub owner_label: Option<String>,
}

impl From<&Violation> for FindingData {
    fn from(violation: &Violation) -> Self {
        Self {
            property_path: violation.path.clone(),
            owner_label: (!violation.owner.is_empty()).then(|| violation.owner.clone()),
        }
    }
}

/// A single issue found during analysis
#[derive(Debug, Clone)]
pub struct Issue {
    /// The check that found this issue (e.g., "excess-property.argument")
    pub check_id: String,
    pub kind: FindingKind,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// File where the issue was found
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    pub data: FindingData,
}

impl Issue {
    /// Create an error issue for a violation reported at `span`
    pub fn finding(
        check_id: impl Into<String>,
        kind: FindingKind,
        file: PathBuf,
        span: Span,
        violation: &Violation,
    ) -> Self {
        let data = FindingData::from(violation);
        Self {
            check_id: check_id.into(),
            kind,
            severity: Severity::Error,
            message: kind.message(&data),
            file,
            line: span.start.line,
            column: span.start.column,
            data,
        }
    }

    /// Message identifier of the finding kind
    pub fn identifier(&self) -> &'static str {
        self.kind.message_id()
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Collection of issues from analysis
#[derive(Debug, Default)]
pub struct IssueCollection {
    issues: Vec<Issue>,
}

impl IssueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Apply one severity to every issue
    pub fn set_severity(&mut self, severity: Severity) {
        for issue in &mut self.issues {
            issue.severity = severity;
        }
    }

    /// Sort issues by file, then line, then column
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.column.cmp(&b.column))
        });
    }
}

#[cfg(test)]
pub(crate) fn sample_issue(file: &str, line: usize, path: &str) -> Issue {
    Issue::finding(
        "excess-property.initializer",
        FindingKind::ExcessPropertyOnValue,
        PathBuf::from(file),
        Span::at(line, 5),
        &Violation::new(path, "User"),
    )
}
