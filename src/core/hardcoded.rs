//! Classification of literal strings as user-facing text.
//!
//! A string is reported unless one of the exemptions below applies. The
//! exemptions are checked in a fixed order and the first one wins.

use std::sync::LazyLock;

use regex::Regex;

use super::pattern::SafePattern;
use crate::utils::contains_alphabetic;

/// Property and binding names that never hold user-facing text.
/// Matched case-insensitively as substrings.
pub const BUILT_IN_NON_USER_FACING: &[&str] = &[
    "class",
    "style",
    "type",
    "form",
    "loading",
    "template",
    "icon",
    "size",
    "src",
    "href",
    "router",
    "query",
    "fragment",
    "preserve",
    "skip",
    "replace",
    "state",
    "button",
    "default",
    "validate",
    "element",
    "prefix",
    "direction",
    "styleClasses",
    "tooltipShowEvent",
    "keys",
    "option",
    "position",
    "append",
    "source",
    "test",
    "field",
    "autocomplete",
    "Id",
    "image",
    "url",
    "height",
    "width",
    "target",
    "pSortableColumn",
    "name",
    "alignment",
    "mode",
    "accept",
    "responsiveLayout",
];

/// Static template attributes whose value is shown to the user.
pub const USER_FACING_ATTRIBUTES: &[&str] =
    &["placeholder", "title", "alt", "aria-label", "aria-description"];

/// File extensions that commonly appear as bare words in code.
const RESERVED_WORDS: &[&str] = &["xlsx", "xlx", "csv", "pdf", "png"];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

static TECHNICAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(/|#|https?://|access_denied|error_|success_|warning_|info_|debug_|data-|aria-)")
        .unwrap()
});

static TRANSLATION_KEY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+([._][a-z0-9]+)+$").unwrap());

static TEST_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(spec|test)\.[jt]s$").unwrap());

/// Why a string was not reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    NoAlphabetic,
    IgnorePattern,
    Separator,
    Email,
    ReservedWord,
    TechnicalPrefix,
    TranslationKey,
}

/// Built-in non-user-facing names, optionally extended by a user pattern.
#[derive(Debug, Clone)]
pub struct Denylist {
    alternatives: Vec<String>,
}

impl Denylist {
    pub fn new(extension: Option<&SafePattern>) -> Self {
        let alternatives = BUILT_IN_NON_USER_FACING
            .iter()
            .map(|s| s.to_string())
            .chain(extension.into_iter().flat_map(|p| p.alternatives().iter().cloned()))
            .map(|s| s.to_lowercase())
            .collect();
        Self { alternatives }
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.alternatives.iter().any(|alt| name.contains(alt.as_str()))
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(None)
    }
}

/// First exemption that applies to `text`, or `None` if it must be reported.
///
/// The ignore pattern sees the raw text; the shape checks see it trimmed.
pub fn exemption(text: &str, ignore: Option<&SafePattern>) -> Option<Exemption> {
    if !contains_alphabetic(text) {
        return Some(Exemption::NoAlphabetic);
    }
    if ignore.is_some_and(|p| p.is_match(text)) {
        return Some(Exemption::IgnorePattern);
    }

    let text = text.trim();
    if text.contains(['_', '-']) {
        return Some(Exemption::Separator);
    }
    if EMAIL.is_match(text) {
        return Some(Exemption::Email);
    }
    if RESERVED_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
        return Some(Exemption::ReservedWord);
    }
    if TECHNICAL_PREFIX.is_match(text) {
        return Some(Exemption::TechnicalPrefix);
    }
    if TRANSLATION_KEY_SHAPE.is_match(text) {
        return Some(Exemption::TranslationKey);
    }
    None
}

pub fn is_test_file(filename: &str) -> bool {
    TEST_FILE.is_match(filename)
}
