//! Analysis engine.
//!
//! The engine never touches the file system and never parses source text.
//! A host hands it a filename and the nodes of an already parsed file:
//!
//! ```text
//! FileAnalyzer::new(filename)      resolve FileContext (once)
//!   visit(node) ...                extract candidates, validate, classify
//!   finish()                       Vec<Diagnostic>
//! ```
//!
//! ## Module Structure
//!
//! - `context`: filename → expected key prefix and file kind
//! - `tracker`: literal values bound to local identifiers
//! - `extract`: candidate keys from script and template nodes
//! - `validate`: key checks against the file context
//! - `hardcoded`: user-facing text classification
//! - `pattern`: validated user patterns
//! - `analyzer`: per-file state and node dispatch

pub mod analyzer;
pub mod context;
pub mod diagnostic;
pub mod extract;
pub mod hardcoded;
pub mod node;
pub mod options;
pub mod pattern;
pub mod tracker;
pub mod validate;

pub use analyzer::{AnalyzerOptions, FileAnalyzer, RuleSet};
pub use context::{FileContext, FileKind, resolve_file_context};
pub use diagnostic::{Diagnostic, Violation};
pub use node::{
    BoundAttribute, BoundText, Node, ScriptNode, Span, TemplateNode, Text, TextAttribute,
};
pub use options::{HardcodedOptions, KeyNamingOptions};
pub use pattern::{PatternError, SafePattern};
