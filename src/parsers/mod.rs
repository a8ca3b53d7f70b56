//! Source parsers feeding the analyzer.
//!
//! - `script`: TypeScript files (swc), walked in document order
//! - `template`: Angular HTML templates, flattened to template nodes

pub mod script;
pub mod template;
