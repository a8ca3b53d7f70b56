//! Single-file analysis: parse one source text and run the analyzer over it.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::SourceMap;

use crate::core::{AnalyzerOptions, Diagnostic, FileAnalyzer, RuleSet};
use crate::parsers::{
    script::{parse_script_source, walk_script},
    template::parse_template,
};
use crate::utils::LineIndex;

/// Analyze one file's text.
///
/// Files the analyzer has no naming context for are not parsed at all.
/// Returns an error when the file cannot be parsed.
pub fn analyze_source(
    file_path: &str,
    source: &str,
    options: &AnalyzerOptions,
    rules: RuleSet,
) -> Result<Vec<Diagnostic>> {
    let mut analyzer = FileAnalyzer::new(file_path, options, rules);
    if analyzer.context().is_none() {
        return Ok(analyzer.finish());
    }

    if file_path.ends_with(".html") {
        let items = parse_template(source).map_err(|e| {
            let (line, col) = LineIndex::new(source).line_col(source, e.offset());
            anyhow!("{} at {}:{}", e, line, col)
        })?;
        for item in &items {
            analyzer.visit(item.as_node().into());
        }
    } else if file_path.ends_with(".ts") {
        let parsed = parse_script_source(
            source.to_string(),
            file_path,
            Arc::new(SourceMap::default()),
        )?;
        analyzer = analyzer.with_script_base(parsed.start_pos);
        walk_script(&parsed.module, &mut analyzer);
    }

    Ok(analyzer.finish())
}
