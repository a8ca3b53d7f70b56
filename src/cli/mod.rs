//! Command-line interface layer.
//!
//! Kept separate from `core` and `analysis` so the rules can be used as a
//! library without any terminal output.

use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command, OutputFormat};
pub use exit_status::ExitStatus;

use commands::{CommandResult, check::check, init::init};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    let (result, format) = match command {
        Command::Check(cmd) => (check(&cmd)?, cmd.args.format),
        Command::Init => (init()?, OutputFormat::Text),
    };
    report::print(&result, format, verbose);

    Ok(exit_status_from_result(&result))
}

fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
