//! Report formatting and printing.
//!
//! Text output follows cargo's diagnostic layout; JSON output is a single
//! document with every issue and the run summary.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::Violation;
use crate::issues::{Issue, Report, ReportLocation, Rule, Severity};

pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer. `issues` must already be sorted.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);
    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

pub fn print_success(source_files: usize) {
    print_success_to(source_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

pub fn print(result: &CommandResult, format: OutputFormat, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => match format {
            OutputFormat::Text => {
                if result.issues.is_empty() {
                    print_success(result.source_files_checked);
                } else {
                    report(&result.issues);
                }
                print_parse_warning(result.parse_error_count, verbose);
            }
            OutputFormat::Json => print_json_to(result, &mut io::stdout().lock()),
        },
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
        Some(error) => eprintln!("{} {}", "error:".bold().red(), error),
    }
}

// ============================================================
// Text Output
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based, in characters; the caret is placed by display width.
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let (total_errors, total_warnings) = count_by_severity(issues);
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn count_by_severity(issues: &[Issue]) -> (usize, usize) {
    issues
        .iter()
        .fold((0, 0), |(errors, warnings), i| match i.report_severity() {
            Severity::Error => (errors + 1, warnings),
            Severity::Warning => (errors, warnings + 1),
        })
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.location.file_path.as_str(),
            ctx.location.line,
            ctx.location.col,
            Some(ctx.source_line.as_str()),
        ),
        ReportLocation::File { path } => (*path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// JSON Output
// ============================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    issues: Vec<JsonIssue<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonIssue<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    severity: Severity,
    rule: Rule,
    message: String,
    /// `messageId` and the message data of rule violations.
    #[serde(flatten)]
    violation: Option<&'a Violation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    files_checked: usize,
    errors: usize,
    warnings: usize,
    parse_errors: usize,
}

fn json_issue(issue: &Issue) -> JsonIssue<'_> {
    let (file, position, violation) = match issue {
        Issue::Violation(v) => (
            v.context.location.file_path.as_str(),
            Some((v.context.location.line, v.context.location.col)),
            Some(&v.violation),
        ),
        Issue::ParseError(p) => (p.file_path.as_str(), None, None),
    };
    JsonIssue {
        file,
        line: position.map(|(line, _)| line),
        column: position.map(|(_, col)| col),
        severity: issue.report_severity(),
        rule: issue.report_rule(),
        message: issue.message(),
        violation,
    }
}

fn print_json_to<W: Write>(result: &CommandResult, writer: &mut W) {
    let report = JsonReport {
        issues: result.issues.iter().map(json_issue).collect(),
        summary: JsonSummary {
            files_checked: result.source_files_checked,
            errors: result.error_count,
            warnings: result.warning_count,
            parse_errors: result.parse_error_count,
        },
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => eprintln!("{} {}", "error:".bold().red(), err),
    }
}
