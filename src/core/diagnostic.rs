//! Rule findings produced by the analyzer.

use serde::Serialize;

use super::{context::FileKind, node::Span};
use crate::issues::{Rule, Severity};

/// What was found. Each variant carries the data its message interpolates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "messageId", rename_all = "camelCase")]
pub enum Violation {
    #[serde(rename_all = "camelCase")]
    MismatchedKey { key: String, expected_prefix: String },
    #[serde(rename_all = "camelCase")]
    TooManyParts {
        key: String,
        #[serde(rename = "type")]
        kind: FileKind,
        max_parts: usize,
        example: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    NotEnoughParts {
        key: String,
        #[serde(rename = "type")]
        kind: FileKind,
        min_parts: usize,
        example: &'static str,
    },
    NoHardString { text: String },
    InvalidPattern {
        option: &'static str,
        pattern: String,
        reason: String,
    },
}

impl Violation {
    pub fn message_id(&self) -> &'static str {
        match self {
            Violation::MismatchedKey { .. } => "mismatchedKey",
            Violation::TooManyParts { .. } => "tooManyParts",
            Violation::NotEnoughParts { .. } => "notEnoughParts",
            Violation::NoHardString { .. } => "noHardString",
            Violation::InvalidPattern { .. } => "invalidPattern",
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Violation::MismatchedKey { .. }
            | Violation::TooManyParts { .. }
            | Violation::NotEnoughParts { .. } => Rule::KeyNamingConvention,
            Violation::NoHardString { .. } | Violation::InvalidPattern { .. } => {
                Rule::NoHardcodedStrings
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Violation::InvalidPattern { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Interpolation data, in message order.
    pub fn data(&self) -> Vec<(&'static str, String)> {
        match self {
            Violation::MismatchedKey {
                key,
                expected_prefix,
            } => vec![("key", key.clone()), ("expectedPrefix", expected_prefix.clone())],
            Violation::TooManyParts {
                key,
                kind,
                max_parts,
                example,
            } => vec![
                ("key", key.clone()),
                ("type", kind.to_string()),
                ("maxParts", max_parts.to_string()),
                ("example", example.to_string()),
            ],
            Violation::NotEnoughParts {
                key,
                kind,
                min_parts,
                example,
            } => vec![
                ("key", key.clone()),
                ("type", kind.to_string()),
                ("minParts", min_parts.to_string()),
                ("example", example.to_string()),
            ],
            Violation::NoHardString { text } => vec![("text", text.clone())],
            Violation::InvalidPattern {
                option,
                pattern,
                reason,
            } => vec![
                ("option", option.to_string()),
                ("pattern", pattern.clone()),
                ("reason", reason.clone()),
            ],
        }
    }

    pub fn message(&self) -> String {
        match self {
            Violation::MismatchedKey {
                key,
                expected_prefix,
            } => format!(
                "Key '{}' does not follow naming convention. Expected the i18n key to start with '{}.'",
                key, expected_prefix
            ),
            Violation::TooManyParts {
                key,
                kind,
                max_parts,
                example,
            } => format!(
                "Key '{}' is too long. Max depth for a {} is {}. For example, '{}'",
                key, kind, max_parts, example
            ),
            Violation::NotEnoughParts {
                key,
                kind,
                min_parts,
                example,
            } => format!(
                "Key '{}' is too short. Min depth for a {} is {}. For example, '{}'",
                key, kind, min_parts, example
            ),
            Violation::NoHardString { text } => format!(
                "Hard-coded string \"{}\" should be replaced with a translation key.",
                text
            ),
            Violation::InvalidPattern {
                option,
                pattern,
                reason,
            } => format!(
                "Invalid {} \"{}\": {}. Falling back to the built-in defaults.",
                option, pattern, reason
            ),
        }
    }
}

/// A violation anchored at a location in the analyzed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub span: Span,
    pub violation: Violation,
}

impl Diagnostic {
    pub fn new(span: Span, violation: Violation) -> Self {
        Self { span, violation }
    }

    pub fn rule(&self) -> Rule {
        self.violation.rule()
    }

    pub fn message(&self) -> String {
        self.violation.message()
    }
}
