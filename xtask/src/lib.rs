//! Workspace developer workflow commands (`cargo xtask`).
//!
//! The crate is a small CLI layer over a shared automation runtime. Command modules own
//! workflow policy while [`runtime`] owns process execution, configuration loading, and error
//! reporting.

pub mod cli;
pub mod commands;
pub mod runtime;

use crate::cli::TopLevelCommand;
use crate::commands::quality::{FmtCommand, LintCommand, TestCommand};
use crate::commands::verify::VerifyCommand;
use crate::commands::web::{BuildWebCommand, CheckWebCommand, DevCommand, SetupWebCommand};
use crate::runtime::context::CommandContext;
use crate::runtime::error::XtaskResult;

/// Shared command contract for top-level xtask command families.
///
/// [`XtaskCommand::parse`] is a pure translation from raw CLI arguments into typed options;
/// side effects belong in [`XtaskCommand::run`].
pub trait XtaskCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    ///
    /// Implementations should return [`XtaskError::validation`](crate::runtime::error::XtaskError::validation)
    /// for invalid argument shapes.
    fn parse(args: &[String]) -> XtaskResult<Self::Options>;

    /// Execute the command family using the shared runtime context.
    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()>;
}

/// Executes `xtask` using the current process arguments.
pub fn execute_from_env() -> XtaskResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    let ctx = CommandContext::new()?;

    match parsed {
        TopLevelCommand::SetupWeb(args) => {
            SetupWebCommand::run(&ctx, SetupWebCommand::parse(&args)?)
        }
        TopLevelCommand::Dev(args) => DevCommand::run(&ctx, DevCommand::parse(&args)?),
        TopLevelCommand::BuildWeb(args) => {
            BuildWebCommand::run(&ctx, BuildWebCommand::parse(&args)?)
        }
        TopLevelCommand::CheckWeb(args) => {
            CheckWebCommand::run(&ctx, CheckWebCommand::parse(&args)?)
        }
        TopLevelCommand::Test(args) => TestCommand::run(&ctx, TestCommand::parse(&args)?),
        TopLevelCommand::Lint(args) => LintCommand::run(&ctx, LintCommand::parse(&args)?),
        TopLevelCommand::Fmt(args) => FmtCommand::run(&ctx, FmtCommand::parse(&args)?),
        TopLevelCommand::Verify(args) => VerifyCommand::run(&ctx, VerifyCommand::parse(&args)?),
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts an xtask result into a process exit code.
///
/// All command failures map to exit code `1` after printing the formatted error to stderr.
pub fn exit_code(result: XtaskResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
