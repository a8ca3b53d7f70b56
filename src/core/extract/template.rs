//! Candidate extraction from Angular template expressions.
//!
//! Keys are quoted, dotted tokens in the expression piped into `transloco`:
//!
//! ```text
//! {{ 'signIn.title' | transloco }}
//! {{ (done ? 'a.done' : 'a.pending') | transloco }}
//! <ng-container *transloco="let t; read: 'signIn.form'">
//! ```
//!
//! Arguments of pipes (`| number: '1.0-0'`) are never candidates.

use std::{collections::BTreeMap, ops::Range, sync::LazyLock};

use regex::Regex;

static QUOTED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^\s'".]+[\w.-]*\.[^\s'".]+)['"]"#).unwrap());

static STRUCTURAL_READ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bread\s*:\s*['"]([^\s'".]+[\w.-]*\.[^\s'".]+)['"]"#).unwrap()
});

const TRANSLATION_PIPE: &str = "transloco";

/// Text and binding check for an explicit pipe into `transloco`, with or
/// without a space after the bar.
pub fn text_mentions_transloco(text: &str) -> bool {
    text.contains("| transloco") || text.contains("|transloco")
}

/// Static attribute check: the `transloco` directive itself, or any value
/// mentioning it (`*transloco="let t; read: '...'"`).
pub fn attribute_mentions_transloco(name: &str, value: &str) -> bool {
    name == TRANSLATION_PIPE || value.to_lowercase().contains(TRANSLATION_PIPE)
}

/// Binding and interpolation check.
pub fn source_mentions_transloco(source: &str) -> bool {
    source.contains(TRANSLATION_PIPE)
}

/// Every candidate key in a template expression or template markup.
///
/// Interpolations (`{{ }}`) are scanned one by one; a source without any is
/// scanned as a single expression. Keys read through a structural
/// `read: '...'` clause follow the piped keys.
pub fn keys_in_expression(source: &str) -> Vec<String> {
    let mut keys = Vec::new();

    let units = interpolations(source);
    if units.is_empty() {
        keys.extend(piped_keys(source));
    } else {
        for unit in units {
            keys.extend(piped_keys(unit));
        }
    }

    keys.extend(
        STRUCTURAL_READ
            .captures_iter(source)
            .map(|caps| caps[1].to_string()),
    );
    keys
}

/// Contents of a binding whose whole expression is one string literal:
/// `[label]="'Save'"` → `Save`.
pub fn string_literal(source: &str) -> Option<&str> {
    let source = source.trim();
    let quote = source.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = source.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut escaped = false;
    for c in inner.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return None,
            _ => {}
        }
    }
    Some(inner)
}

/// Bodies of the `{{ ... }}` interpolations in `source`. An interpolation
/// ends at the first `}}`; an unterminated one is ignored.
fn interpolations(source: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut rest = source;
    while let Some(open) = rest.find("{{") {
        let body = &rest[open + 2..];
        let Some(close) = body.find("}}") else {
            break;
        };
        units.push(&body[..close]);
        rest = &body[close + 2..];
    }
    units
}

/// A bracket group (or the whole unit) while scanning for pipes.
struct Group {
    start: usize,
    /// Offset of the first pipe operator directly inside the group.
    head_end: Option<usize>,
    translated: bool,
}

impl Group {
    fn new(start: usize) -> Self {
        Self {
            start,
            head_end: None,
            translated: false,
        }
    }

    /// Everything after the first pipe is pipe names and arguments; the
    /// head before it holds the piped operand.
    fn close(self, end: usize, heads: &mut Vec<Range<usize>>, arguments: &mut Vec<Range<usize>>) {
        if let Some(head_end) = self.head_end {
            arguments.push(head_end..end);
            if self.translated {
                heads.push(self.start..head_end);
            }
        }
    }
}

/// Keys in every operand piped into `transloco`, at any bracket depth.
///
/// `('a.b' | transloco) | titlecase` yields `a.b`. Quoted tokens inside
/// any pipe's argument list are skipped, and each token is reported once.
fn piped_keys(unit: &str) -> Vec<String> {
    let bytes = unit.as_bytes();
    let mut stack = vec![Group::new(0)];
    let mut heads = Vec::new();
    let mut arguments = Vec::new();
    let mut quote: Option<u8> = None;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' | b'[' | b'{' => stack.push(Group::new(i + 1)),
                b')' | b']' | b'}' if stack.len() > 1 => {
                    if let Some(group) = stack.pop() {
                        group.close(i, &mut heads, &mut arguments);
                    }
                }
                b'|' if bytes.get(i + 1) == Some(&b'|') => i += 1,
                b'|' => {
                    if let Some(group) = stack.last_mut() {
                        if group.head_end.is_none() {
                            group.head_end = Some(i);
                        }
                        if pipe_name(&unit[i + 1..]) == TRANSLATION_PIPE {
                            group.translated = true;
                        }
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    while let Some(group) = stack.pop() {
        group.close(unit.len(), &mut heads, &mut arguments);
    }

    let mut keys = BTreeMap::new();
    for head in heads {
        for caps in QUOTED_KEY.captures_iter(&unit[head.clone()]) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            let offset = head.start + token.start();
            if arguments.iter().any(|args| args.contains(&offset)) {
                continue;
            }
            keys.entry(offset).or_insert_with(|| caps[1].to_string());
        }
    }
    keys.into_values().collect()
}

/// `" transloco: { n: 1 }"` → `"transloco"`
fn pipe_name(rest: &str) -> &str {
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(rest.len());
    &rest[..end]
}
