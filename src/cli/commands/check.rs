use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, finish};
use crate::{analysis::CheckContext, core::RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    /// key-naming-convention
    Naming,
    /// no-hardcoded-strings
    Hardcoded,
}

/// Selected rules; an empty selection runs everything.
pub fn rule_set(checks: &[CheckRule]) -> RuleSet {
    if checks.is_empty() {
        return RuleSet::all();
    }
    RuleSet {
        key_naming: checks.contains(&CheckRule::Naming),
        hardcoded: checks.contains(&CheckRule::Hardcoded),
    }
}

pub fn check(cmd: &CheckCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = CheckContext::new(args.source_root.as_deref(), args.verbose)?;

    let rules = rule_set(&cmd.checks);
    tracing::debug!(files = ctx.files.len(), ?rules, "running check");
    let issues = ctx.check(rules);

    Ok(finish(CommandSummary::Check, issues, ctx.files.len()))
}
