//! Node events the analyzer understands.
//!
//! The host walks a parsed file in document order and hands every node of
//! interest to [`FileAnalyzer::visit`](super::FileAnalyzer::visit) as one of
//! the variants below. Script nodes borrow swc AST nodes directly; template
//! nodes borrow the small template AST defined here.

use serde::Serialize;
use swc_ecma_ast::{AssignExpr, CallExpr, ClassProp, KeyValueProp, VarDeclarator};

/// Byte range inside the analyzed file's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Fixed location used for file-level reports (configuration problems).
    pub fn file_start() -> Self {
        Self::default()
    }
}

/// Plain text between template tags (no interpolation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub span: Span,
}

/// Static attribute: `title="Close"`, or a structural directive
/// `*transloco="let t; read: 'dialog'"` (stored without the `*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub structural: bool,
    pub span: Span,
}

/// Property binding: `[title]="expr"`, or an attribute with interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttribute {
    pub name: String,
    /// Expression source text, as written between the quotes.
    pub source: String,
    pub span: Span,
}

/// Text containing at least one `{{ }}` interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundText {
    pub source: String,
    pub span: Span,
}

/// Script node kinds the rules react to.
#[derive(Debug, Clone, Copy)]
pub enum ScriptNode<'a> {
    /// `const x = ...`
    VarDeclarator(&'a VarDeclarator),
    /// `x = ...`
    Assign(&'a AssignExpr),
    /// `this.translocoService.translate(...)`
    Call(&'a CallExpr),
    /// Object literal property, e.g. the `template:` of a component decorator.
    Property(&'a KeyValueProp),
    /// Class field definition: `title = 'My page';`
    ClassProperty(&'a ClassProp),
}

/// Template node kinds the rules react to.
#[derive(Debug, Clone, Copy)]
pub enum TemplateNode<'a> {
    Text(&'a Text),
    TextAttribute(&'a TextAttribute),
    BoundAttribute(&'a BoundAttribute),
    BoundText(&'a BoundText),
}

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Script(ScriptNode<'a>),
    Template(TemplateNode<'a>),
}

impl<'a> From<ScriptNode<'a>> for Node<'a> {
    fn from(node: ScriptNode<'a>) -> Self {
        Node::Script(node)
    }
}

impl<'a> From<TemplateNode<'a>> for Node<'a> {
    fn from(node: TemplateNode<'a>) -> Self {
        Node::Template(node)
    }
}
