//! Host side of a check run: find files, parse them, run the analyzer.
//!
//! ## Module Structure
//!
//! - `file_scanner`: walk included directories for `.ts` and `.html` files
//! - `source`: parse one file and collect its diagnostics
//! - `context`: config loading and the parallel run over all files

pub mod context;
pub mod file_scanner;
pub mod source;

pub use context::CheckContext;
pub use source::analyze_source;
