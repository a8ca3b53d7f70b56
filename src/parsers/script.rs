use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, GLOBALS, Globals, SourceMap, Spanned};
use swc_ecma_ast::{AssignExpr, CallExpr, ClassProp, KeyValueProp, Module, VarDeclarator};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{FileAnalyzer, ScriptNode};

pub struct ParsedScript {
    pub module: Module,
    /// Source map position of the file's first byte.
    pub start_pos: u32,
}

/// Parse TypeScript source (decorators enabled) into a module.
///
/// Accepts a shared SourceMap so files can be parsed on any thread.
pub fn parse_script_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedScript> {
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        });
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "{} at {}:{}",
                e.kind().msg(),
                loc.line,
                loc.col_display + 1
            )
        })?;

        Ok(ParsedScript {
            module,
            start_pos: source_file.start_pos.0,
        })
    })
}

/// Feed every node the analyzer reacts to, in document order.
pub fn walk_script(module: &Module, analyzer: &mut FileAnalyzer<'_>) {
    module.visit_with(&mut ScriptWalker { analyzer });
}

struct ScriptWalker<'a, 'o> {
    analyzer: &'a mut FileAnalyzer<'o>,
}

impl Visit for ScriptWalker<'_, '_> {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.analyzer.visit(ScriptNode::VarDeclarator(node).into());
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        self.analyzer.visit(ScriptNode::Assign(node).into());
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.analyzer.visit(ScriptNode::Call(node).into());
        node.visit_children_with(self);
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        self.analyzer.visit(ScriptNode::Property(node).into());
        node.visit_children_with(self);
    }

    fn visit_class_prop(&mut self, node: &ClassProp) {
        self.analyzer.visit(ScriptNode::ClassProperty(node).into());
        node.visit_children_with(self);
    }
}
