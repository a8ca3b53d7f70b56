//! User-supplied name patterns.
//!
//! Patterns such as `(theme|variant)Name` come from configuration and are
//! never handed to a regex engine. They are validated against a tiny grammar
//! (literal characters, `|` alternation, `( )` groups) and expanded into a
//! finite set of literal alternatives that are matched by substring search.

use thiserror::Error;

pub const MAX_PATTERN_LEN: usize = 1000;
pub const MAX_ALTERNATIVES: usize = 256;

/// Shapes that are dangerous in a backtracking engine. Rejected up front so
/// the reported reason names the actual problem.
const CATASTROPHIC_SHAPES: &[(&str, &str)] = &[
    (".*.*", "repeated wildcards"),
    (".+.+", "repeated wildcards"),
    ("+)+", "nested quantifiers"),
    ("+)*", "nested quantifiers"),
    ("*)+", "nested quantifiers"),
    ("*)*", "nested quantifiers"),
    ("}+", "nested quantifiers"),
    ("}*", "nested quantifiers"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is longer than {max} characters")]
    TooLong { max: usize },
    #[error("{0} can cause catastrophic backtracking")]
    Catastrophic(&'static str),
    #[error("backreferences are not supported")]
    Backreference,
    #[error("unsupported character '{0}'")]
    UnsupportedChar(char),
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("empty alternative")]
    EmptyAlternative,
    #[error("pattern expands to more than {max} alternatives")]
    TooManyAlternatives { max: usize },
}

/// A validated pattern, expanded to literal alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafePattern {
    source: String,
    alternatives: Vec<String>,
}

impl SafePattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        validate_shape(source)?;

        let chars: Vec<char> = source.chars().collect();
        let mut pos = 0;
        let alternatives = parse_alternation(&chars, &mut pos)?;
        if pos != chars.len() {
            return Err(PatternError::UnbalancedParens);
        }

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// True if any alternative occurs in `text` (case-sensitive).
    pub fn is_match(&self, text: &str) -> bool {
        self.alternatives.iter().any(|alt| text.contains(alt.as_str()))
    }
}

fn validate_shape(source: &str) -> Result<(), PatternError> {
    if source.chars().count() > MAX_PATTERN_LEN {
        return Err(PatternError::TooLong {
            max: MAX_PATTERN_LEN,
        });
    }

    if let Some((_, reason)) = CATASTROPHIC_SHAPES
        .iter()
        .find(|(shape, _)| source.contains(shape))
    {
        return Err(PatternError::Catastrophic(reason));
    }

    let chars: Vec<char> = source.chars().collect();
    if chars
        .windows(2)
        .any(|w| w[0] == '\\' && w[1].is_ascii_digit())
    {
        return Err(PatternError::Backreference);
    }

    if let Some(c) = chars.iter().find(|c| !is_allowed_char(**c)) {
        return Err(PatternError::UnsupportedChar(*c));
    }

    let mut depth: usize = 0;
    for c in &chars {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(PatternError::UnbalancedParens)?
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(PatternError::UnbalancedParens);
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '|' | '(' | ')' | ',')
}

/// `alternation := sequence ('|' sequence)*`
fn parse_alternation(chars: &[char], pos: &mut usize) -> Result<Vec<String>, PatternError> {
    let mut alternatives = Vec::new();
    loop {
        alternatives.extend(parse_sequence(chars, pos)?);
        if alternatives.len() > MAX_ALTERNATIVES {
            return Err(PatternError::TooManyAlternatives {
                max: MAX_ALTERNATIVES,
            });
        }
        if chars.get(*pos) == Some(&'|') {
            *pos += 1;
        } else {
            return Ok(alternatives);
        }
    }
}

/// `sequence := (literal | '(' alternation ')')+`
fn parse_sequence(chars: &[char], pos: &mut usize) -> Result<Vec<String>, PatternError> {
    let mut expanded = vec![String::new()];
    let mut empty = true;

    while let Some(&c) = chars.get(*pos) {
        match c {
            '|' | ')' => break,
            '(' => {
                *pos += 1;
                let group = parse_alternation(chars, pos)?;
                if chars.get(*pos) != Some(&')') {
                    return Err(PatternError::UnbalancedParens);
                }
                *pos += 1;

                if expanded.len() * group.len() > MAX_ALTERNATIVES {
                    return Err(PatternError::TooManyAlternatives {
                        max: MAX_ALTERNATIVES,
                    });
                }
                expanded = expanded
                    .iter()
                    .flat_map(|head| group.iter().map(move |tail| format!("{head}{tail}")))
                    .collect();
            }
            c => {
                *pos += 1;
                for alt in &mut expanded {
                    alt.push(c);
                }
            }
        }
        empty = false;
    }

    if empty {
        return Err(PatternError::EmptyAlternative);
    }
    Ok(expanded)
}
