//! A small Angular template reader.
//!
//! It does not build an element tree. It walks the markup once and emits the
//! flat list of text and attribute nodes the analyzer understands, in document
//! order:
//!
//! | markup                             | node                       |
//! |------------------------------------|----------------------------|
//! | `Welcome`                          | `Text`                     |
//! | `Hi {{ name }}`                    | `BoundText`                |
//! | `title="Close"`                    | `TextAttribute`            |
//! | `*transloco="let t; read: 'x.y'"`  | `TextAttribute` structural |
//! | `[label]="expr"`, `title="{{ x }}"`| `BoundAttribute`           |
//!
//! Event bindings, template references, `let-` variables, animation triggers,
//! comments, and the contents of `<script>` and `<style>` are skipped.
//! Control-flow block syntax (`@if (cond) {`, `} @else {`, `@let x = y;`)
//! separates text but never becomes text itself.

use std::borrow::Cow;

use thiserror::Error;

use crate::core::{BoundAttribute, BoundText, Span, TemplateNode, Text, TextAttribute};

const BLOCK_KEYWORDS: &[&str] = &[
    "if",
    "else",
    "for",
    "switch",
    "case",
    "default",
    "defer",
    "placeholder",
    "loading",
    "error",
    "empty",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateParseError {
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated tag <{name}> starting at byte {offset}")]
    UnterminatedTag { name: String, offset: usize },
    #[error("unterminated attribute value starting at byte {0}")]
    UnterminatedAttribute(usize),
    #[error("unterminated interpolation starting at byte {0}")]
    UnterminatedInterpolation(usize),
}

impl TemplateParseError {
    pub fn offset(&self) -> usize {
        match self {
            TemplateParseError::UnterminatedComment(offset)
            | TemplateParseError::UnterminatedAttribute(offset)
            | TemplateParseError::UnterminatedInterpolation(offset) => *offset,
            TemplateParseError::UnterminatedTag { offset, .. } => *offset,
        }
    }
}

/// Owned template node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateItem {
    Text(Text),
    TextAttribute(TextAttribute),
    BoundAttribute(BoundAttribute),
    BoundText(BoundText),
}

impl TemplateItem {
    pub fn as_node(&self) -> TemplateNode<'_> {
        match self {
            TemplateItem::Text(node) => TemplateNode::Text(node),
            TemplateItem::TextAttribute(node) => TemplateNode::TextAttribute(node),
            TemplateItem::BoundAttribute(node) => TemplateNode::BoundAttribute(node),
            TemplateItem::BoundText(node) => TemplateNode::BoundText(node),
        }
    }
}

pub fn parse_template(source: &str) -> Result<Vec<TemplateItem>, TemplateParseError> {
    TemplateParser {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        items: Vec::new(),
    }
    .parse()
}

struct TemplateParser<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    items: Vec<TemplateItem>,
}

impl<'s> TemplateParser<'s> {
    fn parse(mut self) -> Result<Vec<TemplateItem>, TemplateParseError> {
        let mut text_start = 0;

        while self.pos < self.bytes.len() {
            if self.at("{{") {
                self.pos = self.interpolation_end(self.pos)?;
            } else if self.bytes[self.pos] == b'<' && self.at_markup() {
                self.flush_text(text_start, self.pos);
                self.parse_markup()?;
                text_start = self.pos;
            } else {
                self.pos += 1;
            }
        }
        self.flush_text(text_start, self.bytes.len());

        Ok(self.items)
    }

    fn at(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn at_markup(&self) -> bool {
        matches!(
            self.bytes.get(self.pos + 1),
            Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!'
        )
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.src.get(from..)?.find(needle).map(|i| from + i)
    }

    /// Position just past the `}}` closing the interpolation opened at `start`.
    fn interpolation_end(&self, start: usize) -> Result<usize, TemplateParseError> {
        self.find_from(start + 2, "}}")
            .map(|close| close + 2)
            .ok_or(TemplateParseError::UnterminatedInterpolation(start))
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn parse_markup(&mut self) -> Result<(), TemplateParseError> {
        let start = self.pos;

        if self.at("<!--") {
            let close = self
                .find_from(start + 4, "-->")
                .ok_or(TemplateParseError::UnterminatedComment(start))?;
            self.pos = close + 3;
        } else if self.at("<!") || self.at("</") {
            let close =
                self.find_from(start, ">")
                    .ok_or_else(|| TemplateParseError::UnterminatedTag {
                        name: self.src[start + 1..].chars().take(16).collect(),
                        offset: start,
                    })?;
            self.pos = close + 1;
        } else {
            self.parse_start_tag()?;
        }
        Ok(())
    }

    fn parse_start_tag(&mut self) -> Result<(), TemplateParseError> {
        let tag_start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        while self.pos < self.bytes.len() && is_tag_name_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        let src = self.src;
        let name = &src[name_start..self.pos];

        let self_closing = loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => {
                    return Err(TemplateParseError::UnterminatedTag {
                        name: name.to_string(),
                        offset: tag_start,
                    });
                }
                Some(b'>') => {
                    self.pos += 1;
                    break false;
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    self.pos += 2;
                    break true;
                }
                Some(b'/') => self.pos += 1,
                Some(_) => self.parse_attribute()?,
            }
        };

        if !self_closing
            && let Some(raw) = RAW_TEXT_ELEMENTS
                .iter()
                .find(|raw| name.eq_ignore_ascii_case(raw))
        {
            self.skip_raw_text(raw);
        }
        Ok(())
    }

    fn skip_raw_text(&mut self, element: &str) {
        let closing = format!("</{}", element);
        let rest = self.src[self.pos..].to_ascii_lowercase();
        self.pos = match rest.find(&closing) {
            Some(i) => self.pos + i,
            None => self.bytes.len(),
        };
    }

    fn parse_attribute(&mut self) -> Result<(), TemplateParseError> {
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.at_attribute_name_end() {
            self.pos += 1;
        }
        let name_end = self.pos;
        if name_end == start {
            // Stray quote or `=`.
            self.pos += 1;
            return Ok(());
        }

        self.skip_whitespace();
        let (value, end) = if self.bytes.get(self.pos) == Some(&b'=') {
            self.pos += 1;
            self.skip_whitespace();
            self.parse_attribute_value(start)?
        } else {
            self.pos = name_end;
            ("", name_end)
        };

        let name = &self.src[start..name_end];
        let span = Span::new(start as u32, end as u32);
        if let Some(item) = classify_attribute(name, value, span) {
            self.items.push(item);
        }
        Ok(())
    }

    fn at_attribute_name_end(&self) -> bool {
        match self.bytes[self.pos] {
            b'=' | b'>' | b'"' | b'\'' => true,
            b'/' => self.bytes.get(self.pos + 1) == Some(&b'>'),
            b => b.is_ascii_whitespace(),
        }
    }

    /// Returns the value and the position just past it.
    fn parse_attribute_value(
        &mut self,
        attr_start: usize,
    ) -> Result<(&'s str, usize), TemplateParseError> {
        let src = self.src;
        match self.bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = self.pos + 1;
                let close = self.bytes[value_start..]
                    .iter()
                    .position(|b| *b == quote)
                    .map(|i| value_start + i)
                    .ok_or(TemplateParseError::UnterminatedAttribute(attr_start))?;
                self.pos = close + 1;
                Ok((&src[value_start..close], self.pos))
            }
            _ => {
                let value_start = self.pos;
                while self.pos < self.bytes.len()
                    && !self.bytes[self.pos].is_ascii_whitespace()
                    && self.bytes[self.pos] != b'>'
                {
                    self.pos += 1;
                }
                Ok((&src[value_start..self.pos], self.pos))
            }
        }
    }

    /// Emit the text between `start` and `end`, split around control-flow
    /// block syntax.
    fn flush_text(&mut self, start: usize, end: usize) {
        let mut segment_start = start;
        let mut i = start;

        while i < end {
            if self.bytes[i..end].starts_with(b"{{") {
                // Interpolations were validated by the main loop.
                i = self
                    .find_from(i + 2, "}}")
                    .map_or(end, |close| (close + 2).min(end));
                continue;
            }
            match self.bytes[i] {
                b'@' => match self.block_syntax_end(i, end) {
                    Some(block_end) => {
                        self.emit_text(segment_start, i);
                        i = block_end;
                        segment_start = i;
                    }
                    None => i += 1,
                },
                b'}' => {
                    self.emit_text(segment_start, i);
                    i += 1;
                    segment_start = i;
                }
                _ => i += 1,
            }
        }
        self.emit_text(segment_start, end);
    }

    /// End of `@keyword (params) {` or `@let name = expr;` starting at `at`.
    fn block_syntax_end(&self, at: usize, end: usize) -> Option<usize> {
        let bytes = &self.bytes[..end];
        let mut i = at + 1;
        let keyword_start = i;
        while i < end && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        let keyword = &self.src[keyword_start..i];

        if keyword == "let" {
            return Some(bytes[i..].iter().position(|b| *b == b';').map_or(end, |p| i + p + 1));
        }
        if !BLOCK_KEYWORDS.contains(&keyword) {
            return None;
        }

        let skip_ws = |mut i: usize| {
            while i < end && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            i
        };

        i = skip_ws(i);
        if keyword == "else" && bytes[i..].starts_with(b"if") {
            i = skip_ws(i + 2);
        }
        if bytes.get(i) == Some(&b'(') {
            let mut depth = 0usize;
            while i < end {
                match bytes[i] {
                    b'(' => depth += 1,
                    b')' => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            i = skip_ws(i);
        }
        (bytes.get(i) == Some(&b'{')).then_some(i + 1)
    }

    fn emit_text(&mut self, start: usize, end: usize) {
        let raw = &self.src[start..end];
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let lead = raw.len() - raw.trim_start().len();
        let span = Span::new((start + lead) as u32, (start + lead + trimmed.len()) as u32);

        let item = if trimmed.contains("{{") {
            TemplateItem::BoundText(BoundText {
                source: trimmed.to_string(),
                span,
            })
        } else {
            TemplateItem::Text(Text {
                value: decode_entities(trimmed).into_owned(),
                span,
            })
        };
        self.items.push(item);
    }
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn classify_attribute(name: &str, value: &str, span: Span) -> Option<TemplateItem> {
    let bound = |name: &str| {
        Some(TemplateItem::BoundAttribute(BoundAttribute {
            name: name.strip_prefix("attr.").unwrap_or(name).to_string(),
            source: value.to_string(),
            span,
        }))
    };

    if let Some(inner) = name.strip_prefix("[(").and_then(|n| n.strip_suffix(")]")) {
        return bound(inner);
    }
    if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        return bound(inner);
    }
    if let Some(inner) = name.strip_prefix("bind-") {
        return bound(inner);
    }
    if ["(", "on-", "#", "ref-", "let-", "@", "bindon-"]
        .iter()
        .any(|p| name.starts_with(p))
    {
        return None;
    }
    if let Some(inner) = name.strip_prefix('*') {
        return Some(TemplateItem::TextAttribute(TextAttribute {
            name: inner.to_string(),
            value: value.to_string(),
            structural: true,
            span,
        }));
    }
    if value.contains("{{") {
        return bound(name);
    }
    Some(TemplateItem::TextAttribute(TextAttribute {
        name: name.to_string(),
        value: decode_entities(value).into_owned(),
        structural: false,
        span,
    }))
}

/// Decode the HTML character references common in templates.
/// Unknown references are kept verbatim.
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = name.strip_prefix('#') {
        return dec.parse().ok().and_then(char::from_u32);
    }
    let c = match name {
        "nbsp" => '\u{a0}',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "laquo" => '«',
        "raquo" => '»',
        "middot" => '·',
        "bull" => '•',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str) -> Vec<TemplateItem> {
        parse_template(source).unwrap()
    }

    fn text(value: &str, start: u32) -> TemplateItem {
        TemplateItem::Text(Text {
            value: value.to_string(),
            span: Span::new(start, start + value.len() as u32),
        })
    }

    #[test]
    fn test_text_and_interpolation() {
        let source = "<p>Welcome</p>\n<p>Hi {{ name }}</p>";
        assert_eq!(
            parse(source),
            vec![
                text("Welcome", 3),
                TemplateItem::BoundText(BoundText {
                    source: "Hi {{ name }}".to_string(),
                    span: Span::new(18, 31),
                }),
            ]
        );
    }

    #[test]
    fn test_attributes() {
        let source = r#"<input placeholder="Email" [label]="'Save'" (click)="go()" #ref disabled>"#;
        assert_eq!(
            parse(source),
            vec![
                TemplateItem::TextAttribute(TextAttribute {
                    name: "placeholder".to_string(),
                    value: "Email".to_string(),
                    structural: false,
                    span: Span::new(7, 26),
                }),
                TemplateItem::BoundAttribute(BoundAttribute {
                    name: "label".to_string(),
                    source: "'Save'".to_string(),
                    span: Span::new(27, 43),
                }),
                TemplateItem::TextAttribute(TextAttribute {
                    name: "disabled".to_string(),
                    value: String::new(),
                    structural: false,
                    span: Span::new(64, 72),
                }),
            ]
        );
    }

    #[test]
    fn test_structural_and_interpolated_attributes() {
        let source = r#"<ng-container *transloco="let t; read: 'a.b'"><img alt="{{ 'a.c' | transloco }}" [attr.aria-label]="x"/></ng-container>"#;
        let items = parse(source);
        assert_eq!(items.len(), 3);
        assert!(matches!(
            &items[0],
            TemplateItem::TextAttribute(TextAttribute { name, structural: true, .. }) if name == "transloco"
        ));
        assert!(matches!(
            &items[1],
            TemplateItem::BoundAttribute(BoundAttribute { name, .. }) if name == "alt"
        ));
        assert!(matches!(
            &items[2],
            TemplateItem::BoundAttribute(BoundAttribute { name, .. }) if name == "aria-label"
        ));
    }

    #[test]
    fn test_skipped_content() {
        let source = "<!-- Hidden note --><script>var x = 'Hello';</script><style>.a { color: red }</style><b>Shown</b>";
        let items = parse(source);
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], TemplateItem::Text(t) if t.value == "Shown"));
    }

    #[test]
    fn test_control_flow_blocks() {
        let source = "@if (user.isAdmin) {\n  Admin area\n} @else if (x) {\n  Guest\n}\n@for (item of items; track item.id) {<li>{{ item }}</li>} @empty { Nothing here }\n@let total = a + b;";
        let values: Vec<String> = parse(source)
            .into_iter()
            .map(|item| match item {
                TemplateItem::Text(t) => t.value,
                TemplateItem::BoundText(t) => t.source,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(values, vec!["Admin area", "Guest", "{{ item }}", "Nothing here"]);
    }

    #[test]
    fn test_at_sign_in_text() {
        let items = parse("<p>Write to help@example.com</p>");
        assert!(matches!(&items[0], TemplateItem::Text(t) if t.value == "Write to help@example.com"));
    }

    #[test]
    fn test_less_than_in_text() {
        let items = parse("<p>a < b and {{ x < y }}</p>");
        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], TemplateItem::BoundText(t) if t.source == "a < b and {{ x < y }}"));
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&copy; 2024&nbsp;Acme"), "© 2024\u{a0}Acme");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("a & b &unknown; c"), "a & b &unknown; c");

        let items = parse("<p>&copy; 2024</p>");
        assert!(matches!(&items[0], TemplateItem::Text(t) if t.value == "© 2024"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_template("<p>{{ broken </p>"),
            Err(TemplateParseError::UnterminatedInterpolation(3))
        );
        assert_eq!(
            parse_template("<!-- open"),
            Err(TemplateParseError::UnterminatedComment(0))
        );
        assert_eq!(
            parse_template(r#"<a title="x>"#),
            Err(TemplateParseError::UnterminatedAttribute(3))
        );
        assert_eq!(
            parse_template("<div class=x"),
            Err(TemplateParseError::UnterminatedTag {
                name: "div".to_string(),
                offset: 0
            })
        );
    }
}
