//! JSON output format

use super::Formatter;
use crate::issue::{Issue, IssueCollection, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    totals: Totals,
    files: BTreeMap<String, FileErrors<'a>>,
}

#[derive(Serialize)]
struct Totals {
    errors: usize,
    warnings: usize,
    file_errors: usize,
}

#[derive(Serialize)]
struct FileErrors<'a> {
    errors: usize,
    messages: Vec<FileMessage<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMessage<'a> {
    message: &'a str,
    line: usize,
    column: usize,
    severity: Severity,
    rule: &'a str,
    message_id: &'static str,
    property_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<&'a str>,
}

impl<'a> FileMessage<'a> {
    fn new(issue: &'a Issue) -> Self {
        Self {
            message: &issue.message,
            line: issue.line,
            column: issue.column,
            severity: issue.severity,
            rule: &issue.check_id,
            message_id: issue.identifier(),
            property_path: &issue.data.property_path,
            owner: issue.data.owner_label.as_deref(),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut files: BTreeMap<String, Vec<&Issue>> = BTreeMap::new();
        for issue in issues.issues() {
            files
                .entry(issue.file.display().to_string())
                .or_default()
                .push(issue);
        }

        let file_errors: BTreeMap<String, FileErrors> = files
            .into_iter()
            .map(|(path, mut path_issues)| {
                path_issues.sort_by_key(|i| (i.line, i.column));
                let errors = path_issues
                    .iter()
                    .filter(|i| i.severity == Severity::Error)
                    .count();
                let messages = path_issues.into_iter().map(FileMessage::new).collect();
                (path, FileErrors { errors, messages })
            })
            .collect();

        let output = JsonOutput {
            totals: Totals {
                errors: issues.error_count(),
                warnings: issues.warning_count(),
                file_errors: file_errors.len(),
            },
            files: file_errors,
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}
