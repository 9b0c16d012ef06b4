//! Test, lint, and formatting commands over the whole workspace.

use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;

pub(crate) fn test_args(extra: Vec<String>) -> Vec<String> {
    let mut args = vec!["test".to_string(), "--workspace".to_string()];
    args.extend(extra);
    args
}

pub(crate) fn lint_args() -> Vec<String> {
    ["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(crate) fn fmt_args(check: bool) -> Vec<String> {
    let mut args = vec!["fmt".to_string(), "--all".to_string()];
    if check {
        args.push("--".into());
        args.push("--check".into());
    }
    args
}

/// `cargo xtask test`
pub struct TestCommand;

impl XtaskCommand for TestCommand {
    type Options = Vec<String>;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        Ok(args.to_vec())
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        ctx.process()
            .run_owned(ctx.root(), "cargo", test_args(options))
    }
}

/// `cargo xtask lint`
pub struct LintCommand;

impl XtaskCommand for LintCommand {
    type Options = ();

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(XtaskError::validation(
                "`cargo xtask lint` does not accept extra arguments",
            ))
        }
    }

    fn run(ctx: &CommandContext, _options: Self::Options) -> XtaskResult<()> {
        ctx.process().run_owned(ctx.root(), "cargo", lint_args())
    }
}

/// Options for `cargo xtask fmt`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FmtOptions {
    /// Report unformatted files without rewriting them.
    pub check: bool,
}

/// `cargo xtask fmt`
pub struct FmtCommand;

impl XtaskCommand for FmtCommand {
    type Options = FmtOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        match args {
            [] => Ok(FmtOptions::default()),
            [flag] if flag == "--check" => Ok(FmtOptions { check: true }),
            _ => Err(XtaskError::validation(format!(
                "unsupported `cargo xtask fmt` arguments: {}",
                args.join(" ")
            ))),
        }
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        ctx.process()
            .run_owned(ctx.root(), "cargo", fmt_args(options.check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_parse_accepts_only_check_flag() {
        assert_eq!(FmtCommand::parse(&[]), Ok(FmtOptions { check: false }));
        assert_eq!(
            FmtCommand::parse(&["--check".to_string()]),
            Ok(FmtOptions { check: true })
        );
        assert!(FmtCommand::parse(&["--write".to_string()]).is_err());
    }

    #[test]
    fn cargo_argument_shapes() {
        assert_eq!(fmt_args(true), vec!["fmt", "--all", "--", "--check"]);
        assert_eq!(fmt_args(false), vec!["fmt", "--all"]);
        assert_eq!(
            test_args(vec!["-p".into(), "web_starter".into()]),
            vec!["test", "--workspace", "-p", "web_starter"]
        );
        assert_eq!(lint_args().last().map(String::as_str), Some("warnings"));
    }

    #[test]
    fn lint_rejects_extra_arguments() {
        assert!(LintCommand::parse(&[]).is_ok());
        assert!(LintCommand::parse(&["--fix".to_string()]).is_err());
    }
}
