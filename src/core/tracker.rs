//! Literal values bound to local identifiers.
//!
//! `const key = cond ? 'a.b' : 'a.c'; translate(key)` resolves `key` to both
//! literals. Bindings only grow: a reassignment adds values, it never evicts.

use std::collections::HashMap;

use super::node::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Default)]
pub struct VariableTracker {
    bindings: HashMap<String, Vec<TrackedLiteral>>,
}

impl VariableTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `literals` to the values known for `name`.
    pub fn record(&mut self, name: &str, literals: impl IntoIterator<Item = TrackedLiteral>) {
        let mut literals = literals.into_iter().peekable();
        if literals.peek().is_none() {
            return;
        }
        self.bindings
            .entry(name.to_string())
            .or_default()
            .extend(literals);
    }

    /// All values recorded for `name`, in insertion order.
    pub fn lookup(&self, name: &str) -> &[TrackedLiteral] {
        self.bindings.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
