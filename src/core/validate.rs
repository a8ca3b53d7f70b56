//! Key validation against a file's naming context.

use super::{context::FileContext, diagnostic::Violation};

/// Check one candidate key. Returns the first violation, if any.
///
/// Order matters: ignored prefixes bypass everything, malformed keys
/// (empty segments) are reported as too short before the prefix is compared,
/// and depth is only checked once the prefix matches.
pub fn validate_key(
    key: &str,
    context: &FileContext,
    ignored_prefixes: &[String],
) -> Option<Violation> {
    if ignored_prefixes.iter().any(|p| key.starts_with(p.as_str())) {
        return None;
    }

    let kind = context.kind;
    let required = kind.key_parts();
    let segments: Vec<&str> = key.split('.').collect();

    if segments.iter().any(|s| s.is_empty()) {
        return Some(Violation::NotEnoughParts {
            key: key.to_string(),
            kind,
            min_parts: required,
            example: kind.example_key(),
        });
    }

    let prefix = context.prefix.as_str();
    let under_prefix = key == prefix
        || key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'));
    if !under_prefix {
        return Some(Violation::MismatchedKey {
            key: key.to_string(),
            expected_prefix: prefix.to_string(),
        });
    }

    if segments.len() < required {
        Some(Violation::NotEnoughParts {
            key: key.to_string(),
            kind,
            min_parts: required,
            example: kind.example_key(),
        })
    } else if segments.len() > required {
        Some(Violation::TooManyParts {
            key: key.to_string(),
            kind,
            max_parts: required,
            example: kind.example_key(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::context::FileKind;

    fn component(prefix: &str) -> FileContext {
        FileContext {
            prefix: prefix.to_string(),
            kind: FileKind::Component,
        }
    }

    fn service(prefix: &str) -> FileContext {
        FileContext {
            prefix: format!("services.{}", prefix),
            kind: FileKind::Service,
        }
    }

    #[test]
    fn test_valid_keys() {
        assert_eq!(validate_key("googleSignIn.header", &component("googleSignIn"), &[]), None);
        assert_eq!(
            validate_key("services.employeeStatus.error", &service("employeeStatus"), &[]),
            None
        );
    }

    #[test]
    fn test_mismatched_prefix() {
        assert_eq!(
            validate_key("googleSignIn1.header", &component("googleSignIn"), &[]),
            Some(Violation::MismatchedKey {
                key: "googleSignIn1.header".to_string(),
                expected_prefix: "googleSignIn".to_string(),
            })
        );
        assert!(matches!(
            validate_key("someRandom.key", &component("potentialDuplicatesReviewDialog"), &[]),
            Some(Violation::MismatchedKey { .. })
        ));
    }

    #[test]
    fn test_depth() {
        assert_eq!(
            validate_key("services.employeeStatus", &service("employeeStatus"), &[]),
            Some(Violation::NotEnoughParts {
                key: "services.employeeStatus".to_string(),
                kind: FileKind::Service,
                min_parts: 3,
                example: "services.warningAccountLockSoon.example",
            })
        );
        assert_eq!(
            validate_key("signIn", &component("signIn"), &[]),
            Some(Violation::NotEnoughParts {
                key: "signIn".to_string(),
                kind: FileKind::Component,
                min_parts: 2,
                example: "signIn.warningAccountLockSoon",
            })
        );
        assert_eq!(
            validate_key("signIn.form.title", &component("signIn"), &[]),
            Some(Violation::TooManyParts {
                key: "signIn.form.title".to_string(),
                kind: FileKind::Component,
                max_parts: 2,
                example: "signIn.warningAccountLockSoon",
            })
        );
    }

    #[test]
    fn test_empty_segments_are_too_short() {
        for key in ["signIn.", ".signIn.title", "signIn..title", "other..x"] {
            assert!(
                matches!(
                    validate_key(key, &component("signIn"), &[]),
                    Some(Violation::NotEnoughParts { min_parts: 2, .. })
                ),
                "{key}"
            );
        }
    }

    #[test]
    fn test_ignored_prefixes_bypass_everything() {
        let ignored = vec!["common.".to_string(), "shared".to_string()];
        let ctx = component("signIn");
        assert_eq!(validate_key("common.ok", &ctx, &ignored), None);
        assert_eq!(validate_key("common..broken.deep.key", &ctx, &ignored), None);
        assert_eq!(validate_key("sharedButtons.save", &ctx, &ignored), None);
        assert!(validate_key("commons.ok", &ctx, &ignored).is_some());
    }
}
