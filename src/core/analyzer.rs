//! Per-file analysis.
//!
//! A host creates one [`FileAnalyzer`] per file, feeds it every node of
//! interest in document order through [`FileAnalyzer::visit`], and collects
//! the diagnostics with [`FileAnalyzer::finish`].

use swc_ecma_ast::{AssignTarget, CallExpr, ClassProp, Expr, KeyValueProp, SimpleAssignTarget};

use super::{
    context::{FileContext, resolve_file_context},
    diagnostic::{Diagnostic, Violation},
    extract::{script, template},
    hardcoded::{self, Denylist, USER_FACING_ATTRIBUTES},
    node::{BoundAttribute, Node, ScriptNode, Span, TemplateNode, Text, TextAttribute},
    options::{HardcodedOptions, KeyNamingOptions},
    pattern::SafePattern,
    tracker::{TrackedLiteral, VariableTracker},
    validate::validate_key,
};
use crate::utils::truncate_chars;

/// Reported hard-coded text is cut to this many characters.
const MAX_REPORTED_TEXT: usize = 50;

/// Which rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub key_naming: bool,
    pub hardcoded: bool,
}

impl RuleSet {
    pub fn all() -> Self {
        Self {
            key_naming: true,
            hardcoded: true,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Rule options with user patterns compiled. Built once per run and shared
/// by every analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    key_naming: KeyNamingOptions,
    denylist: Denylist,
    ignore: Option<SafePattern>,
    pattern_problems: Vec<Violation>,
}

impl AnalyzerOptions {
    /// Invalid patterns are dropped and remembered as `invalidPattern`
    /// violations; the built-in defaults apply in their place.
    pub fn new(key_naming: KeyNamingOptions, hardcoded: &HardcodedOptions) -> Self {
        let mut pattern_problems = Vec::new();
        let extension = compile_pattern(
            "nonUserFacingPattern",
            hardcoded.non_user_facing_pattern.as_deref(),
            &mut pattern_problems,
        );
        let ignore = compile_pattern(
            "ignorePattern",
            hardcoded.ignore_pattern.as_deref(),
            &mut pattern_problems,
        );

        Self {
            key_naming,
            denylist: Denylist::new(extension.as_ref()),
            ignore,
            pattern_problems,
        }
    }

    pub fn key_naming(&self) -> &KeyNamingOptions {
        &self.key_naming
    }

    pub fn pattern_problems(&self) -> &[Violation] {
        &self.pattern_problems
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::new(KeyNamingOptions::default(), &HardcodedOptions::default())
    }
}

fn compile_pattern(
    option: &'static str,
    source: Option<&str>,
    problems: &mut Vec<Violation>,
) -> Option<SafePattern> {
    let source = source.filter(|s| !s.is_empty())?;
    match SafePattern::parse(source) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            tracing::warn!(option, pattern = source, %err, "ignoring invalid pattern");
            problems.push(Violation::InvalidPattern {
                option,
                pattern: source.to_string(),
                reason: err.to_string(),
            });
            None
        }
    }
}

/// Kind of source the file holds, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Template,
    Script,
    TestScript,
    Other,
}

impl Surface {
    fn of(filename: &str) -> Self {
        if filename.ends_with(".html") {
            Surface::Template
        } else if hardcoded::is_test_file(filename) {
            Surface::TestScript
        } else if filename.ends_with(".ts") {
            Surface::Script
        } else {
            Surface::Other
        }
    }
}

pub struct FileAnalyzer<'o> {
    options: &'o AnalyzerOptions,
    rules: RuleSet,
    context: Option<FileContext>,
    surface: Surface,
    tracker: VariableTracker,
    script_base: u32,
    diagnostics: Vec<Diagnostic>,
}

impl<'o> FileAnalyzer<'o> {
    pub fn new(filename: &str, options: &'o AnalyzerOptions, rules: RuleSet) -> Self {
        let context = resolve_file_context(filename, &options.key_naming);

        let mut diagnostics = Vec::new();
        if context.is_some() && rules.hardcoded {
            diagnostics.extend(
                options
                    .pattern_problems
                    .iter()
                    .map(|v| Diagnostic::new(Span::file_start(), v.clone())),
            );
        }

        Self {
            options,
            rules,
            context,
            surface: Surface::of(filename),
            tracker: VariableTracker::new(),
            script_base: 0,
            diagnostics,
        }
    }

    /// Position of the file's first byte in the swc source map, so that swc
    /// spans can be turned into file offsets.
    pub fn with_script_base(mut self, base: u32) -> Self {
        self.script_base = base;
        self
    }

    pub fn context(&self) -> Option<&FileContext> {
        self.context.as_ref()
    }

    pub fn visit(&mut self, node: Node<'_>) {
        if self.context.is_none() {
            return;
        }

        match node {
            Node::Script(ScriptNode::VarDeclarator(decl)) => {
                if let (Some(name), Some(init)) =
                    (script::binding_name(&decl.name), decl.init.as_deref())
                {
                    self.track(name, init);
                }
            }
            Node::Script(ScriptNode::Assign(assign)) => {
                if let AssignTarget::Simple(SimpleAssignTarget::Ident(ident)) = &assign.left {
                    self.track(ident.id.sym.as_str(), &assign.right);
                }
            }
            Node::Script(ScriptNode::Call(call)) => self.check_translation_call(call),
            Node::Script(ScriptNode::Property(prop)) => self.check_inline_template(prop),
            Node::Script(ScriptNode::ClassProperty(prop)) => self.check_class_field(prop),
            Node::Template(TemplateNode::Text(text)) => self.check_text(text),
            Node::Template(TemplateNode::TextAttribute(attr)) => self.check_text_attribute(attr),
            Node::Template(TemplateNode::BoundAttribute(attr)) => {
                self.check_bound_attribute(attr)
            }
            Node::Template(TemplateNode::BoundText(text)) => {
                if self.rules.key_naming && template::source_mentions_transloco(&text.source) {
                    self.check_keys(template::keys_in_expression(&text.source), text.span);
                }
            }
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn script_span(&self, span: swc_common::Span) -> Span {
        Span::new(
            span.lo.0.saturating_sub(self.script_base),
            span.hi.0.saturating_sub(self.script_base),
        )
    }

    fn track(&mut self, name: &str, value: &Expr) {
        let literals: Vec<TrackedLiteral> = script::collect_string_literals(value)
            .into_iter()
            .map(|literal| TrackedLiteral {
                span: self.script_span(literal.span),
                value: literal.value,
            })
            .collect();
        self.tracker.record(name, literals);
    }

    fn check_translation_call(&mut self, call: &CallExpr) {
        if !self.rules.key_naming || !script::is_translation_call(call) {
            return;
        }
        let Some(arg) = script::first_argument(call) else {
            return;
        };

        if let Expr::Ident(ident) = arg {
            let tracked = self.tracker.lookup(ident.sym.as_str()).to_vec();
            for literal in tracked {
                self.check_key(&literal.value, literal.span);
            }
            return;
        }

        for literal in script::collect_string_literals(arg) {
            let span = self.script_span(literal.span);
            self.check_key(&literal.value, span);
        }
    }

    fn check_inline_template(&mut self, prop: &KeyValueProp) {
        if !self.rules.key_naming {
            return;
        }
        let Some((markup, span)) = script::inline_template(prop) else {
            return;
        };
        let span = self.script_span(span);
        self.check_keys(template::keys_in_expression(&markup), span);
    }

    fn check_class_field(&mut self, prop: &ClassProp) {
        if !self.rules.hardcoded || self.surface != Surface::Script {
            return;
        }
        let Some((name, literal)) = script::class_field_literal(prop) else {
            return;
        };
        if name.is_some_and(|name| self.options.denylist.matches(name)) {
            return;
        }
        let span = self.script_span(literal.span);
        self.check_hardcoded(&literal.value, span);
    }

    fn check_text(&mut self, text: &Text) {
        if self.rules.key_naming && template::text_mentions_transloco(&text.value) {
            self.check_keys(template::keys_in_expression(&text.value), text.span);
        }
        if self.rules.hardcoded && self.surface == Surface::Template {
            self.check_hardcoded(text.value.trim(), text.span);
        }
    }

    fn check_text_attribute(&mut self, attr: &TextAttribute) {
        if self.rules.key_naming && template::attribute_mentions_transloco(&attr.name, &attr.value)
        {
            self.check_keys(template::keys_in_expression(&attr.value), attr.span);
        }
        if self.rules.hardcoded
            && self.surface == Surface::Template
            && !attr.structural
            && USER_FACING_ATTRIBUTES.contains(&attr.name.as_str())
        {
            self.check_hardcoded(&attr.value, attr.span);
        }
    }

    fn check_bound_attribute(&mut self, attr: &BoundAttribute) {
        if self.rules.key_naming && template::source_mentions_transloco(&attr.source) {
            self.check_keys(template::keys_in_expression(&attr.source), attr.span);
        }
        if !self.rules.hardcoded || self.surface != Surface::Template {
            return;
        }
        if self.options.denylist.matches(&attr.name)
            || template::text_mentions_transloco(&attr.source)
        {
            return;
        }
        if let Some(text) = template::string_literal(&attr.source) {
            self.check_hardcoded(text, attr.span);
        }
    }

    fn check_keys(&mut self, keys: Vec<String>, span: Span) {
        for key in keys {
            self.check_key(&key, span);
        }
    }

    fn check_key(&mut self, key: &str, span: Span) {
        let Some(context) = self.context.as_ref() else {
            return;
        };
        if let Some(violation) = validate_key(key, context, &self.options.key_naming.ignored_prefixes)
        {
            self.diagnostics.push(Diagnostic::new(span, violation));
        }
    }

    fn check_hardcoded(&mut self, text: &str, span: Span) {
        if let Some(reason) = hardcoded::exemption(text, self.options.ignore.as_ref()) {
            tracing::trace!(?reason, text, "not user-facing");
            return;
        }
        self.diagnostics.push(Diagnostic::new(
            span,
            Violation::NoHardString {
                text: truncate_chars(text, MAX_REPORTED_TEXT).to_string(),
            },
        ));
    }
}
