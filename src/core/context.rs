//! File context resolution.
//!
//! Maps a filename to the key prefix every translation key in that file must
//! start with. `sign-in.component.ts` owns keys under `signIn.`, while
//! `employee-status.service.ts` owns keys under `services.employeeStatus.`.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use super::options::KeyNamingOptions;

static KEBAB_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-([a-z])").unwrap());

/// Kind of Angular artifact a file declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Service,
    Pipe,
    Directive,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Component => "component",
            FileKind::Service => "service",
            FileKind::Pipe => "pipe",
            FileKind::Directive => "directive",
        }
    }

    /// Namespace segment placed in front of non-component prefixes.
    pub fn namespace(self) -> Option<&'static str> {
        match self {
            FileKind::Component => None,
            FileKind::Service => Some("services"),
            FileKind::Pipe => Some("pipes"),
            FileKind::Directive => Some("directives"),
        }
    }

    /// Exact number of dot-separated segments a key must have.
    pub fn key_parts(self) -> usize {
        match self {
            FileKind::Component => 2,
            _ => 3,
        }
    }

    /// Well-formed key shown in diagnostics.
    pub fn example_key(self) -> &'static str {
        match self {
            FileKind::Component => "signIn.warningAccountLockSoon",
            _ => "services.warningAccountLockSoon.example",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming context of one file. Computed once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub prefix: String,
    pub kind: FileKind,
}

const KIND_SUFFIXES: &[(&str, FileKind)] = &[
    (".component.ts", FileKind::Component),
    (".component.html", FileKind::Component),
    (".service.ts", FileKind::Service),
    (".pipe.ts", FileKind::Pipe),
    (".directive.ts", FileKind::Directive),
];

const PAGE_SUFFIXES: &[&str] = &[".page.ts", ".page.html"];

/// Resolve the naming context for `filename`.
///
/// Returns `None` when the basename carries no recognized kind suffix
/// (`*.spec.ts`, `main.ts`, `index.html`, ...). Such files are not analyzed.
pub fn resolve_file_context(filename: &str, options: &KeyNamingOptions) -> Option<FileContext> {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let (stem, kind) = split_kind_suffix(basename, options.recognize_pages)?;
    let stem = strip_file_prefixes(stem, &options.strip_file_prefixes);
    if stem.is_empty() {
        return None;
    }

    let base = KEBAB_SEGMENT.replace_all(stem, |caps: &regex::Captures| caps[1].to_uppercase());
    let prefix = match kind.namespace() {
        Some(namespace) => format!("{}.{}", namespace, base),
        None => base.into_owned(),
    };

    tracing::debug!(file = filename, %kind, %prefix, "resolved key prefix");
    Some(FileContext { prefix, kind })
}

fn split_kind_suffix(basename: &str, recognize_pages: bool) -> Option<(&str, FileKind)> {
    let found = KIND_SUFFIXES
        .iter()
        .find_map(|(suffix, kind)| basename.strip_suffix(suffix).map(|stem| (stem, *kind)));
    if found.is_some() || !recognize_pages {
        return found;
    }
    PAGE_SUFFIXES
        .iter()
        .find_map(|suffix| basename.strip_suffix(suffix))
        .map(|stem| (stem, FileKind::Component))
}

fn strip_file_prefixes<'a>(mut stem: &'a str, prefixes: &[String]) -> &'a str {
    loop {
        let next = prefixes
            .iter()
            .filter(|p| !p.is_empty())
            .find_map(|p| stem.strip_prefix(p.as_str()));
        match next {
            Some(rest) => stem = rest,
            None => return stem,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(filename: &str) -> Option<FileContext> {
        resolve_file_context(filename, &KeyNamingOptions::default())
    }

    fn prefix_of(filename: &str) -> Option<String> {
        resolve(filename).map(|ctx| ctx.prefix)
    }

    #[test]
    fn test_component_files() {
        let ctx = resolve("src/app/google-sign-in/google-sign-in.component.ts").unwrap();
        assert_eq!(ctx.prefix, "googleSignIn");
        assert_eq!(ctx.kind, FileKind::Component);

        assert_eq!(
            prefix_of("potential-duplicates-review-dialog.component.html").as_deref(),
            Some("potentialDuplicatesReviewDialog")
        );
    }

    #[test]
    fn test_non_component_kinds() {
        assert_eq!(
            prefix_of("employee-status.service.ts").as_deref(),
            Some("services.employeeStatus")
        );
        assert_eq!(prefix_of("file-size.pipe.ts").as_deref(), Some("pipes.fileSize"));
        assert_eq!(
            prefix_of("auto-focus.directive.ts").as_deref(),
            Some("directives.autoFocus")
        );
    }

    #[test]
    fn test_unrecognized_files() {
        assert_eq!(resolve("google-sign-in.component.spec.ts"), None);
        assert_eq!(resolve("employee-status.service.spec.ts"), None);
        assert_eq!(resolve("main.ts"), None);
        assert_eq!(resolve("index.html"), None);
        assert_eq!(resolve("file-size.pipe.html"), None);
        assert_eq!(resolve(".component.ts"), None);
    }

    #[test]
    fn test_strip_file_prefixes() {
        assert_eq!(
            prefix_of("feature-user-list.component.ts").as_deref(),
            Some("userList")
        );
        assert_eq!(prefix_of("ui-button.component.html").as_deref(), Some("button"));
        assert_eq!(
            prefix_of("feature-ui-card.component.ts").as_deref(),
            Some("card")
        );
        assert_eq!(prefix_of("feature-.component.ts"), None);

        let options = KeyNamingOptions {
            strip_file_prefixes: vec!["app-".to_string()],
            ..Default::default()
        };
        let ctx = resolve_file_context("app-feature-x.component.ts", &options).unwrap();
        assert_eq!(ctx.prefix, "featureX");
    }

    #[test]
    fn test_kebab_case_only_lowercase_letters() {
        assert_eq!(prefix_of("step-2.component.ts").as_deref(), Some("step-2"));
        assert_eq!(prefix_of("my-Widget.component.ts").as_deref(), Some("my-Widget"));
        assert_eq!(prefix_of("sign-in-v2.component.ts").as_deref(), Some("signInV2"));
    }

    #[test]
    fn test_pages() {
        let ctx = resolve("account-settings.page.ts").unwrap();
        assert_eq!(ctx.prefix, "accountSettings");
        assert_eq!(ctx.kind, FileKind::Component);

        let options = KeyNamingOptions {
            recognize_pages: false,
            ..Default::default()
        };
        assert_eq!(resolve_file_context("account-settings.page.ts", &options), None);
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(
            prefix_of(r"src\app\sign-in.component.ts").as_deref(),
            Some("signIn")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = resolve("feature-sign-in.component.ts");
        let second = resolve("feature-sign-in.component.ts");
        assert_eq!(first, second);
    }
}
