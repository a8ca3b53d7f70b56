//! Issue types for check results.
//!
//! An issue is a core [`Violation`] placed at a line and column of a file, or
//! a file that could not be parsed. Issues carry everything the reporters
//! need to render them.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::Violation;

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    KeyNamingConvention,
    NoHardcodedStrings,
    ParseError,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::KeyNamingConvention => "key-naming-convention",
            Rule::NoHardcodedStrings => "no-hardcoded-strings",
            Rule::ParseError => "parse-error",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================
// Source Location & Context
// ============================================================

/// 1-based line and column (in characters) inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source line containing the location, for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A rule violation found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationIssue {
    pub context: SourceContext,
    pub violation: Violation,
}

/// A file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Violation(ViolationIssue),
    ParseError(ParseErrorIssue),
}

// ============================================================
// Report Trait
// ============================================================

pub enum ReportLocation<'a> {
    /// Line-level location with the source line for context display.
    Source(&'a SourceContext),
    /// File-level only (parse errors).
    File { path: &'a str },
}

/// Common interface of all issue types for the reporters.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Rendered message.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Machine-readable message id, when the issue has one.
    fn message_id(&self) -> Option<&'static str> {
        None
    }
}

impl Report for ViolationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.violation.message()
    }

    fn report_severity(&self) -> Severity {
        self.violation.severity()
    }

    fn report_rule(&self) -> Rule {
        self.violation.rule()
    }

    fn message_id(&self) -> Option<&'static str> {
        Some(self.violation.message_id())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering (for sorting in reports)
// ============================================================

impl Issue {
    pub fn file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.file_path.as_str(),
            ReportLocation::File { path } => path,
        }
    }

    fn sort_position(&self) -> (usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.location.line, ctx.location.col),
            ReportLocation::File { .. } => (0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.sort_position().cmp(&other.sort_position()))
            .then_with(|| self.report_rule().cmp(&other.report_rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn violation_issue(path: &str, line: usize, col: usize, text: &str) -> Issue {
        Issue::Violation(ViolationIssue {
            context: SourceContext::new(SourceLocation::new(path, line, col), "<p>x</p>"),
            violation: Violation::NoHardString {
                text: text.to_string(),
            },
        })
    }

    #[test]
    fn test_violation_issue_report() {
        let issue = violation_issue("./src/app.component.html", 3, 5, "Save");

        assert_eq!(issue.report_severity(), Severity::Error);
        assert_eq!(issue.report_rule(), Rule::NoHardcodedStrings);
        assert_eq!(issue.message_id(), Some("noHardString"));
        assert_eq!(
            issue.message(),
            "Hard-coded string \"Save\" should be replaced with a translation key."
        );
        assert_eq!(issue.file_path(), "./src/app.component.html");
    }

    #[test]
    fn test_parse_error_issue_report() {
        let issue = Issue::ParseError(ParseErrorIssue {
            file_path: "./src/broken.component.ts".to_string(),
            error: "Unexpected token at 1:7".to_string(),
        });

        assert_eq!(issue.report_severity(), Severity::Error);
        assert_eq!(issue.report_rule(), Rule::ParseError);
        assert_eq!(issue.message_id(), None);
        assert!(matches!(issue.location(), ReportLocation::File { .. }));
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::KeyNamingConvention.to_string(), "key-naming-convention");
        assert_eq!(Rule::NoHardcodedStrings.to_string(), "no-hardcoded-strings");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
    }

    #[test]
    fn test_issue_ordering() {
        let parse_error = Issue::ParseError(ParseErrorIssue {
            file_path: "./b.component.ts".to_string(),
            error: "oops".to_string(),
        });
        let mut issues = vec![
            violation_issue("./b.component.html", 2, 1, "B"),
            parse_error.clone(),
            violation_issue("./a.component.html", 9, 1, "Z"),
            violation_issue("./a.component.html", 1, 4, "Y"),
            violation_issue("./a.component.html", 1, 4, "X"),
        ];
        issues.sort();

        let order: Vec<(String, String)> = issues
            .iter()
            .map(|i| (i.file_path().to_string(), i.message()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("./a.component.html".to_string(), violation_issue("", 0, 0, "X").message()),
                ("./a.component.html".to_string(), violation_issue("", 0, 0, "Y").message()),
                ("./a.component.html".to_string(), violation_issue("", 0, 0, "Z").message()),
                ("./b.component.html".to_string(), violation_issue("", 0, 0, "B").message()),
                ("./b.component.ts".to_string(), "oops".to_string()),
            ]
        );
    }
}
