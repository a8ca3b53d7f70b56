//! Candidate extraction from TypeScript expressions.

use swc_common::Span;
use swc_ecma_ast::{
    Accessibility, CallExpr, Callee, ClassProp, Expr, KeyValueProp, Lit, MemberProp, Pat, PropName,
    Tpl,
};

/// Method names that look up a translation: `translocoService.translate(key)`.
const TRANSLATION_METHODS: &[&str] = &["translate", "instant"];

/// A string value found in script code, with its swc span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLiteral {
    pub value: String,
    pub span: Span,
}

pub fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_paren(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_paren(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_paren(&ts_sat.expr),
        _ => expr,
    }
}

pub fn is_translation_call(call: &CallExpr) -> bool {
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    match unwrap_paren(callee) {
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(ident) => TRANSLATION_METHODS.contains(&ident.sym.as_str()),
            _ => false,
        },
        _ => false,
    }
}

/// First argument of a call, parentheses and TS wrappers removed.
pub fn first_argument(call: &CallExpr) -> Option<&Expr> {
    call.args
        .first()
        .filter(|arg| arg.spread.is_none())
        .map(|arg| unwrap_paren(&arg.expr))
}

/// String literals reachable from `expr`: plain literals, both branches of
/// conditionals (recursively) and the non-empty static chunks of template
/// literals.
pub fn collect_string_literals(expr: &Expr) -> Vec<ScriptLiteral> {
    let mut out = Vec::new();
    collect_into(expr, &mut out);
    out
}

fn collect_into(expr: &Expr, out: &mut Vec<ScriptLiteral>) {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => {
            if let Some(value) = s.value.as_str() {
                out.push(ScriptLiteral {
                    value: value.to_string(),
                    span: s.span,
                });
            }
        }
        Expr::Cond(cond) => {
            collect_into(&cond.cons, out);
            collect_into(&cond.alt, out);
        }
        Expr::Tpl(tpl) => collect_template_chunks(tpl, out),
        _ => {}
    }
}

fn collect_template_chunks(tpl: &Tpl, out: &mut Vec<ScriptLiteral>) {
    for quasi in &tpl.quasis {
        let value = quasi
            .cooked
            .as_ref()
            .and_then(|cooked| cooked.as_str())
            .unwrap_or(quasi.raw.as_str());
        if !value.is_empty() {
            out.push(ScriptLiteral {
                value: value.to_string(),
                span: quasi.span,
            });
        }
    }
}

/// Name of a simple identifier binding (`const key = ...`).
pub fn binding_name(pat: &Pat) -> Option<&str> {
    match pat {
        Pat::Ident(binding) => Some(binding.id.sym.as_str()),
        _ => None,
    }
}

/// Template markup of a `template:` property, with the span of its value.
///
/// Template literal chunks are concatenated; embedded expressions are dropped.
pub fn inline_template(prop: &KeyValueProp) -> Option<(String, Span)> {
    let is_template_key = match &prop.key {
        PropName::Ident(ident) => ident.sym.as_str() == "template",
        PropName::Str(s) => s.value.as_str() == Some("template"),
        _ => false,
    };
    if !is_template_key {
        return None;
    }

    match &*prop.value {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|v| (v.to_string(), s.span)),
        Expr::Tpl(tpl) => {
            let markup: String = tpl.quasis.iter().map(|q| q.raw.as_str()).collect();
            Some((markup, tpl.span))
        }
        _ => None,
    }
}

/// String literal initializer of a class field that may hold user-facing
/// text, along with the field's identifier name when it has one.
///
/// `private` and `readonly` fields are skipped.
pub fn class_field_literal(prop: &ClassProp) -> Option<(Option<&str>, ScriptLiteral)> {
    if prop.readonly || prop.accessibility == Some(Accessibility::Private) {
        return None;
    }
    let value = prop.value.as_deref()?;
    let Expr::Lit(Lit::Str(s)) = value else {
        return None;
    };
    let literal = ScriptLiteral {
        value: s.value.as_str()?.to_string(),
        span: s.span,
    };
    let name = match &prop.key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    };
    Some((name, literal))
}
