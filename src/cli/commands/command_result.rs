use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running an ngi18n command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted. Empty for `init`.
    pub issues: Vec<Issue>,
    pub parse_error_count: usize,
    /// Number of source files (`.ts` and `.html`) that were checked.
    pub source_files_checked: usize,
}
