//! GitHub Actions annotations output format

use super::Formatter;
use crate::issue::{IssueCollection, Severity};

pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut output = String::new();

        for issue in issues.issues() {
            let level = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            // ::error file={name},line={line},col={col},title={id}::{message}
            output.push_str(&format!(
                "::{} file={},line={},col={},title={}::{}\n",
                level,
                issue.file.display(),
                issue.line,
                issue.column,
                issue.identifier(),
                escape_message(&issue.message)
            ));
        }

        output
    }
}

/// Escape special characters for GitHub Actions annotations
fn escape_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::sample_issue;

    #[test]
    fn test_github_format() {
        let mut issues = IssueCollection::new();
        issues.add(sample_issue("src/user.ts", 10, "age"));

        let output = GithubFormatter.format(&issues);

        assert!(output.starts_with(
            "::error file=src/user.ts,line=10,col=5,title=no-excess-property::Object has property 'age'"
        ));
    }

    #[test]
    fn test_escape_message() {
        assert_eq!(escape_message("line1\nline2"), "line1%0Aline2");
        assert_eq!(escape_message("100%"), "100%25");
    }
}
