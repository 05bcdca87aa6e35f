//! Table output format (default, human-readable)

use super::Formatter;
use crate::issue::{IssueCollection, Severity};
use std::collections::BTreeMap;

pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        if issues.is_empty() {
            return " [OK] No excess properties\n".to_string();
        }

        let mut output = String::new();

        // Group by file
        let mut files: BTreeMap<String, Vec<_>> = BTreeMap::new();
        for issue in issues.issues() {
            files
                .entry(issue.file.display().to_string())
                .or_default()
                .push(issue);
        }

        for (file_path, mut file_issues) in files {
            file_issues.sort_by_key(|i| (i.line, i.column));
            output.push_str(&format!("\n -- {} --\n\n", file_path));

            for issue in file_issues {
                let severity_marker = match issue.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARNING",
                };

                output.push_str(&format!(
                    " {} Line {}:{}: {}\n",
                    severity_marker, issue.line, issue.column, issue.message
                ));
                output.push_str(&format!("       ({})\n", issue.identifier()));
            }
        }

        output.push_str(&format!(
            "\n [ERROR] Found {} error{}\n",
            issues.error_count(),
            if issues.error_count() == 1 { "" } else { "s" }
        ));

        if issues.warning_count() > 0 {
            output.push_str(&format!(
                " [WARNING] Found {} warning{}\n",
                issues.warning_count(),
                if issues.warning_count() == 1 { "" } else { "s" }
            ));
        }

        output
    }
}
