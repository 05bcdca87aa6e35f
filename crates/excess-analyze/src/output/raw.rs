//! Raw output format
//!
//! Format: file:line:column:message
//!
//! One finding per line, no headers, no summary.

use super::Formatter;
use crate::issue::IssueCollection;

pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut output = String::new();

        let mut sorted_issues: Vec<_> = issues.issues().iter().collect();
        sorted_issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.column.cmp(&b.column))
        });

        for issue in sorted_issues {
            output.push_str(&format!(
                "{}:{}:{}:{}\n",
                issue.file.display(),
                issue.line,
                issue.column,
                issue.message
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::sample_issue;

    #[test]
    fn test_raw_format() {
        let mut issues = IssueCollection::new();
        issues.add(sample_issue("src/b.ts", 3, "age"));
        issues.add(sample_issue("src/a.ts", 10, "id"));

        let output = RawFormatter.format(&issues);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("src/a.ts:10:5:Object has property 'id'"));
        assert!(lines[1].starts_with("src/b.ts:3:5:"));
    }
}
