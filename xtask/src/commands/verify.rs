//! Local verification workflow.

use crate::commands::quality::{fmt_args, lint_args, test_args};
use crate::commands::web::CheckWebCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;

/// Verification depth.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum VerifyProfile {
    /// Formatting, lint, and tests.
    Fast,
    /// Fast profile plus native and wasm compile checks of the site.
    #[default]
    Full,
}

/// Steps run by a verification profile, in order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyStep {
    /// `cargo fmt --all -- --check`
    FmtCheck,
    /// `cargo clippy` with warnings denied.
    Lint,
    /// `cargo test --workspace`
    Test,
    /// `cargo xtask check-web`
    CheckWeb,
}

impl VerifyStep {
    fn label(self) -> &'static str {
        match self {
            Self::FmtCheck => "fmt",
            Self::Lint => "lint",
            Self::Test => "test",
            Self::CheckWeb => "check-web",
        }
    }
}

impl VerifyProfile {
    /// Steps for this profile.
    pub fn steps(self) -> Vec<VerifyStep> {
        let mut steps = vec![VerifyStep::FmtCheck, VerifyStep::Lint, VerifyStep::Test];
        if self == Self::Full {
            steps.push(VerifyStep::CheckWeb);
        }
        steps
    }
}

/// `cargo verify`
pub struct VerifyCommand;

impl XtaskCommand for VerifyCommand {
    type Options = VerifyProfile;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] | ["full"] => Ok(VerifyProfile::Full),
            ["fast"] => Ok(VerifyProfile::Fast),
            _ => Err(XtaskError::validation(format!(
                "unsupported `cargo verify` arguments: {}",
                args.join(" ")
            ))
            .with_hint("expected `fast` or `full`")),
        }
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        for step in options.steps() {
            println!("==> verify: {}", step.label());
            let result = match step {
                VerifyStep::FmtCheck => {
                    ctx.process()
                        .run_owned(ctx.root(), "cargo", fmt_args(true))
                }
                VerifyStep::Lint => ctx.process().run_owned(ctx.root(), "cargo", lint_args()),
                VerifyStep::Test => {
                    ctx.process()
                        .run_owned(ctx.root(), "cargo", test_args(Vec::new()))
                }
                VerifyStep::CheckWeb => CheckWebCommand::check(ctx),
            };
            result.map_err(|err| err.with_operation(format!("verify {}", step.label())))?;
        }
        println!("verify: all steps passed");
        Ok(())
    }
}
