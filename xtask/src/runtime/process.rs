//! Shared process execution helpers.

use crate::runtime::env::EnvHelper;
use crate::runtime::error::{XtaskError, XtaskResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Shared process runner used by command modules.
///
/// Every invocation is echoed as `+ program args`, runs from a caller-provided directory, and
/// inherits the terminal's stdio. Failures are categorized into [`XtaskError`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner {
    env: EnvHelper,
}

impl ProcessRunner {
    /// Create a process runner.
    pub fn new() -> Self {
        Self { env: EnvHelper }
    }

    /// Return whether the given program is available by checking `--version`.
    pub fn command_available(&self, program: &str) -> bool {
        self.command_succeeds(program, &["--version"])
    }

    /// Return whether a command succeeds with the provided arguments.
    ///
    /// Stdout and stderr are suppressed.
    pub fn command_succeeds(&self, program: &str, args: &[&str]) -> bool {
        Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Require a command to exist.
    ///
    /// Returns an environment error carrying `hint` when the command is unavailable.
    pub fn ensure_command(&self, program: &str, hint: &str) -> XtaskResult<()> {
        if self.command_available(program) {
            Ok(())
        } else {
            Err(
                XtaskError::environment(format!("required command `{program}` not found"))
                    .with_hint(hint),
            )
        }
    }

    /// Return whether `rustup` reports the wasm32 browser target as installed.
    pub fn wasm_target_installed(&self) -> bool {
        let Ok(output) = Command::new("rustup")
            .args(["target", "list", "--installed"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
        else {
            return false;
        };
        output.status.success()
            && String::from_utf8_lossy(&output.stdout)
                .lines()
                .any(|line| line.trim() == "wasm32-unknown-unknown")
    }

    /// Run a process with borrowed string arguments.
    pub fn run(&self, cwd: &Path, program: &str, args: Vec<&str>) -> XtaskResult<()> {
        let owned = args.into_iter().map(ToString::to_string).collect();
        self.run_owned(cwd, program, owned)
    }

    /// Run a process with owned string arguments.
    ///
    /// Non-zero exits are converted into
    /// [`XtaskError::process_exit`](crate::runtime::error::XtaskError::process_exit).
    pub fn run_owned(&self, cwd: &Path, program: &str, args: Vec<String>) -> XtaskResult<()> {
        self.print_command(program, &args);
        let mut cmd = Command::new(program);
        cmd.current_dir(cwd).args(&args);
        self.wait(program, &mut cmd)
    }

    /// Run trunk in `cwd` with normalized `NO_COLOR` handling.
    pub fn run_trunk(&self, cwd: &Path, args: Vec<String>) -> XtaskResult<()> {
        self.print_command("trunk", &args);
        let mut cmd = Command::new("trunk");
        cmd.current_dir(cwd).args(&args);
        self.env.apply_no_color_override(&mut cmd);
        self.wait("trunk", &mut cmd)
    }

    /// Print a process invocation in a stable format.
    pub fn print_command(&self, program: &str, args: &[String]) {
        println!("{}", format_command(program, args));
    }

    fn wait(&self, program: &str, cmd: &mut Command) -> XtaskResult<()> {
        let status = cmd.status().map_err(|err| {
            XtaskError::process_launch(format!("failed to start `{program}`: {err}"))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(XtaskError::process_exit(format!(
                "`{program}` exited with status {status}"
            )))
        }
    }
}

fn format_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        format!("+ {program}")
    } else {
        format!("+ {program} {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;

    #[test]
    fn command_available_reports_missing_binary() {
        let runner = ProcessRunner::new();
        assert!(!runner.command_available("definitely-not-a-real-command-binary"));
    }

    #[test]
    fn command_succeeds_distinguishes_success_and_failure() {
        let runner = ProcessRunner::new();
        assert!(runner.command_succeeds("cargo", &["--version"]));
        assert!(!runner.command_succeeds("cargo", &["__definitely_invalid_subcommand__"]));
    }

    #[test]
    fn ensure_command_carries_hint() {
        let err = ProcessRunner::new()
            .ensure_command("definitely-not-a-real-command-binary", "install it")
            .expect_err("missing command");
        assert_eq!(err.category, XtaskErrorCategory::Environment);
        assert_eq!(err.hint.as_deref(), Some("install it"));
    }

    #[test]
    fn run_reports_launch_failures() {
        let err = ProcessRunner::new()
            .run(Path::new("."), "definitely-not-a-real-command-binary", vec![])
            .expect_err("launch failure");
        assert_eq!(err.category, XtaskErrorCategory::ProcessLaunch);
    }

    #[test]
    fn format_command_joins_arguments() {
        assert_eq!(format_command("cargo", &[]), "+ cargo");
        assert_eq!(
            format_command("cargo", &["fmt".into(), "--all".into()]),
            "+ cargo fmt --all"
        );
    }
}
