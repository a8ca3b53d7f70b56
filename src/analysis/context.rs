use std::{
    collections::HashSet,
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;

use super::{file_scanner::scan_files, source::analyze_source};
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{AnalyzerOptions, Diagnostic, RuleSet},
    issues::{Issue, ParseErrorIssue, SourceContext, SourceLocation, ViolationIssue},
    utils::LineIndex,
};

/// Configuration and file set for one `check` run.
///
/// Configuration priority: CLI arguments, then `.ngi18nrc.json`, then
/// built-in defaults.
pub struct CheckContext {
    pub config: Config,
    /// Directory the config file was searched from.
    pub root_dir: PathBuf,
    /// All source files to analyze (`.ts` and `.html`).
    pub files: HashSet<String>,
    pub verbose: bool,
    options: AnalyzerOptions,
}

impl CheckContext {
    pub fn new(source_root: Option<&Path>, verbose: bool) -> Result<Self> {
        let root_dir = source_root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !root_dir.is_dir() {
            anyhow::bail!("Source root is not a directory: {}", root_dir.display());
        }

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let config = config_result.config;

        let scan_root = resolve_scan_root(&root_dir, &config.source_root);
        let scan_root = scan_root
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", scan_root))?;
        let scan_result = scan_files(scan_root, &config.includes, &config.ignores, verbose);

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        let options = config.analyzer_options();

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            options,
        })
    }

    /// Analyze every file in parallel and convert the findings to issues.
    ///
    /// Unreadable and unparseable files become parse-error issues.
    pub fn check(&self, rules: RuleSet) -> Vec<Issue> {
        self.files
            .par_iter()
            .flat_map_iter(|file_path| self.check_file(file_path, rules))
            .collect()
    }

    fn check_file(&self, file_path: &str, rules: RuleSet) -> Vec<Issue> {
        let result = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path))
            .and_then(|source| {
                let diagnostics = analyze_source(file_path, &source, &self.options, rules)?;
                Ok(to_issues(file_path, &source, diagnostics))
            });

        result.unwrap_or_else(|err| {
            if self.verbose {
                eprintln!(
                    "{} Failed to parse {}: {:#}",
                    "warning:".bold().yellow(),
                    file_path,
                    err
                );
            }
            vec![Issue::ParseError(ParseErrorIssue {
                file_path: file_path.to_string(),
                error: format!("{:#}", err),
            })]
        })
    }
}

/// Directory to scan: the config's `sourceRoot`, relative to `root_dir`.
fn resolve_scan_root(root_dir: &Path, source_root: &str) -> PathBuf {
    let p = Path::new(source_root);
    if p.is_absolute() || root_dir.components().all(|c| matches!(c, Component::CurDir)) {
        return p.to_path_buf();
    }
    root_dir.join(p.strip_prefix(".").unwrap_or(p))
}

fn to_issues(file_path: &str, source: &str, diagnostics: Vec<Diagnostic>) -> Vec<Issue> {
    if diagnostics.is_empty() {
        return Vec::new();
    }

    let index = LineIndex::new(source);
    diagnostics
        .into_iter()
        .map(|diagnostic| {
            let (line, col) = index.line_col(source, diagnostic.span.start as usize);
            Issue::Violation(ViolationIssue {
                context: SourceContext::new(
                    SourceLocation::new(file_path, line, col),
                    index.line_text(source, line),
                ),
                violation: diagnostic.violation,
            })
        })
        .collect()
}
