//! Source file discovery.
//!
//! Includes and ignores are either literal paths (prefix match, brackets
//! taken literally) or glob patterns, told apart by the presence of `*` or `?`.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn warn(verbose: bool, message: std::fmt::Arguments<'_>) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

pub struct ScanResult {
    pub files: HashSet<String>,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
}

struct IgnoreSet {
    paths: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, patterns: &[String], verbose: bool) -> Self {
        let mut paths = Vec::new();
        let mut globs = Vec::new();
        for p in patterns {
            if !is_glob_pattern(p) {
                paths.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => globs.push(pattern),
                Err(e) => warn(verbose, format_args!("Invalid ignore pattern '{}': {}", p, e)),
            }
        }
        Self { paths, globs }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.paths.iter().any(|ignored| path.starts_with(ignored)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.globs.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk: the base directory itself when no includes are given.
fn include_roots(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        let full = base_dir.join(inc);
        if !is_glob_pattern(inc) {
            if full.exists() {
                roots.push(full);
            } else {
                warn(
                    verbose,
                    format_args!("Include path does not exist: {}", full.display()),
                );
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => warn(verbose, format_args!("Invalid glob pattern '{}': {}", inc, e)),
        }
    }
    roots
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let base = Path::new(base_dir);
    let ignores = IgnoreSet::new(base, ignore_patterns, verbose);

    let mut files = HashSet::new();
    let mut skipped_count = 0;

    for root in include_roots(base, includes, verbose) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn(verbose, format_args!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            if ignores.is_ignored(path) {
                continue;
            }
            if entry.file_type().is_file() && is_scannable_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    tracing::debug!(files = files.len(), skipped_count, "scan finished");
    ScanResult {
        files,
        skipped_count,
    }
}

/// TypeScript sources and Angular templates. Declaration files are skipped.
fn is_scannable_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    (name.ends_with(".ts") && !name.ends_with(".d.ts")) || name.ends_with(".html")
}
