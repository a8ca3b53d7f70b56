//! ngi18n - translation key naming and hardcoded text checks for Angular
//! projects using Transloco.
//!
//! ## Module Structure
//!
//! - `core`: analysis engine; consumes parsed nodes, returns diagnostics
//! - `parsers`: TypeScript (swc) and Angular template parsing
//! - `analysis`: file scanning and the parallel per-file run
//! - `issues`: located issues and the reporting trait
//! - `config`: `.ngi18nrc.json` loading
//! - `cli`: command-line interface
//! - `utils`: small text helpers

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod parsers;
pub mod utils;
