//! Top-level CLI parsing and help output.

use crate::runtime::error::{XtaskError, XtaskResult};

/// Top-level `xtask` command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    SetupWeb(Vec<String>),
    Dev(Vec<String>),
    BuildWeb(Vec<String>),
    CheckWeb(Vec<String>),
    Test(Vec<String>),
    Lint(Vec<String>),
    Fmt(Vec<String>),
    Verify(Vec<String>),
    Help,
}

/// Parse raw command-line arguments into a top-level command selection.
pub fn parse(args: Vec<String>) -> XtaskResult<TopLevelCommand> {
    let Some(cmd) = args.first().cloned() else {
        return Ok(TopLevelCommand::Help);
    };

    let rest = args[1..].to_vec();
    match cmd.as_str() {
        "setup-web" => Ok(TopLevelCommand::SetupWeb(rest)),
        "dev" => Ok(TopLevelCommand::Dev(rest)),
        "build-web" => Ok(TopLevelCommand::BuildWeb(rest)),
        "check-web" => Ok(TopLevelCommand::CheckWeb(rest)),
        "test" => Ok(TopLevelCommand::Test(rest)),
        "lint" => Ok(TopLevelCommand::Lint(rest)),
        "fmt" => Ok(TopLevelCommand::Fmt(rest)),
        "verify" => Ok(TopLevelCommand::Verify(rest)),
        "help" | "--help" | "-h" => Ok(TopLevelCommand::Help),
        other => Err(XtaskError::validation(format!(
            "unknown xtask command: {other}"
        ))
        .with_hint("run `cargo xtask help` for the command list")),
    }
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: cargo xtask <command> [args]\n\
         \n\
         Commands:\n\
           setup-web           Install wasm target and trunk (if missing)\n\
           dev [serve|build]   Run the trunk dev server in the foreground, or build a dev bundle\n\
           build-web [args]    Build the release web bundle with trunk\n\
           check-web           Run site compile checks (CSR native + wasm)\n\
           test [args]         Run the workspace test suite\n\
           lint                Run clippy over the workspace with warnings denied\n\
           fmt [--check]       Format the workspace (or only check formatting)\n\
           verify [fast|full]  Run fmt check, lint, and tests; `full` adds check-web (default: full)\n"
    );
}
