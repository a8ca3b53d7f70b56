//! Per-rule options, as they appear under `rules` in `.ngi18nrc.json`.

use serde::{Deserialize, Serialize};

/// Options for `key-naming-convention`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KeyNamingOptions {
    /// Keys starting with any of these are accepted without further checks.
    #[serde(default)]
    pub ignored_prefixes: Vec<String>,
    /// Leading filename prefixes removed before deriving the key prefix.
    #[serde(default = "default_strip_file_prefixes")]
    pub strip_file_prefixes: Vec<String>,
    /// Treat `*.page.ts` / `*.page.html` as components.
    #[serde(default = "default_recognize_pages")]
    pub recognize_pages: bool,
}

fn default_strip_file_prefixes() -> Vec<String> {
    vec!["feature-".to_string(), "ui-".to_string()]
}

fn default_recognize_pages() -> bool {
    true
}

impl Default for KeyNamingOptions {
    fn default() -> Self {
        Self {
            ignored_prefixes: Vec::new(),
            strip_file_prefixes: default_strip_file_prefixes(),
            recognize_pages: default_recognize_pages(),
        }
    }
}

/// Options for `no-hardcoded-strings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HardcodedOptions {
    /// Extra property/binding names that never hold user-facing text,
    /// e.g. `"(theme|variant)Name"`. Extends the built-in list.
    #[serde(default)]
    pub non_user_facing_pattern: Option<String>,
    /// Strings containing a match are never reported.
    #[serde(default)]
    pub ignore_pattern: Option<String>,
}
