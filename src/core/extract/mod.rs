//! Translation-key candidate extraction.
//!
//! - `script`: TypeScript call arguments, tracked variables, inline templates
//! - `template`: Angular template expressions and structural directives

pub mod script;
pub mod template;
