use super::{CommandResult, CommandSummary};
use crate::issues::{Issue, Report, Severity};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let count = |severity: Severity| {
        issues
            .iter()
            .filter(|i| i.report_severity() == severity)
            .count()
    };
    let mut error_count = count(Severity::Error);
    let warning_count = count(Severity::Warning);

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        issues,
        parse_error_count,
        source_files_checked,
    }
}
