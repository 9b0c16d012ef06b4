//! Web toolchain setup, dev server, bundle, and compile-check commands.

use crate::runtime::config::ConfigLoader;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{XtaskError, XtaskResult};
use crate::XtaskCommand;
use serde::Deserialize;

const DEV_SERVER_CONFIG_FILE: &str = "tools/automation/dev_server.toml";
const SITE_PACKAGE: &str = "web_starter";
const SITE_CARGO_FEATURE: &str = "csr";
const WASM_TARGET: &str = "wasm32-unknown-unknown";
const TRUNK_HINT: &str = "Install it with `cargo setup-web` (or `cargo install trunk`)";

#[derive(Clone, Debug, Deserialize)]
struct DevServerConfigFile {
    dev_server: DevServerConfig,
}

/// Typed development server configuration loaded from `tools/automation/dev_server.toml`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct DevServerConfig {
    pub(crate) default_host: String,
    pub(crate) default_port: u16,
    #[serde(default)]
    pub(crate) open_browser: bool,
}

impl DevServerConfig {
    fn validate(self) -> XtaskResult<Self> {
        if self.default_host.trim().is_empty() {
            return Err(XtaskError::config("dev_server.default_host must not be empty"));
        }
        if self.default_port == 0 {
            return Err(XtaskError::config(
                "dev_server.default_port must be greater than zero",
            ));
        }
        Ok(self)
    }
}

fn load_dev_server_config(ctx: &CommandContext) -> XtaskResult<DevServerConfig> {
    ConfigLoader::<DevServerConfigFile>::new(ctx.root(), DEV_SERVER_CONFIG_FILE)
        .load()?
        .dev_server
        .validate()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BuildProfile {
    Dev,
    Release,
}

fn arg_present(args: &[String], flag: &str) -> bool {
    let prefixed = format!("{flag}=");
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&prefixed))
}

fn trunk_serve_args(config: &DevServerConfig, extra: Vec<String>) -> Vec<String> {
    let mut args = vec!["serve".to_string(), "index.html".to_string()];
    if !arg_present(&extra, "--address") {
        args.push("--address".into());
        args.push(config.default_host.clone());
    }
    if !arg_present(&extra, "--port") {
        args.push("--port".into());
        args.push(config.default_port.to_string());
    }
    if config.open_browser && !arg_present(&extra, "--open") {
        args.push("--open".into());
    }
    if !arg_present(&extra, "--no-sri") {
        args.push("--no-sri=true".into());
    }
    args.extend(extra);
    args
}

fn trunk_build_args(profile: BuildProfile, extra: Vec<String>) -> Vec<String> {
    let mut args = vec!["build".to_string(), "index.html".to_string()];
    if profile == BuildProfile::Release {
        args.push("--release".into());
    }
    if !arg_present(&extra, "--dist") {
        args.push("--dist".into());
        args.push(
            match profile {
                BuildProfile::Dev => "../../target/trunk-dev-dist",
                BuildProfile::Release => "../../target/trunk-dist",
            }
            .into(),
        );
    }
    if profile == BuildProfile::Dev && !arg_present(&extra, "--no-sri") {
        args.push("--no-sri=true".into());
    }
    args.extend(extra);
    args
}

fn trunk_build(ctx: &CommandContext, profile: BuildProfile, extra: Vec<String>) -> XtaskResult<()> {
    ctx.process().ensure_command("trunk", TRUNK_HINT)?;
    ctx.process()
        .run_trunk(&ctx.site_dir(), trunk_build_args(profile, extra))
}

/// `cargo setup-web`
pub struct SetupWebCommand;

impl XtaskCommand for SetupWebCommand {
    type Options = ();

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(XtaskError::validation(
                "`cargo setup-web` does not accept extra arguments",
            ))
        }
    }

    fn run(ctx: &CommandContext, _options: Self::Options) -> XtaskResult<()> {
        ctx.process()
            .run(ctx.root(), "rustup", vec!["target", "add", WASM_TARGET])?;

        if ctx.process().command_available("trunk") {
            println!("trunk already installed");
            return Ok(());
        }
        ctx.process()
            .run(ctx.root(), "cargo", vec!["install", "trunk"])
    }
}

/// Parsed `cargo dev` invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DevOptions {
    /// Foreground trunk dev server with pass-through trunk args.
    Serve(Vec<String>),
    /// Non-release bundle with pass-through trunk args.
    Build(Vec<String>),
    /// Print dev usage.
    Help,
}

/// `cargo dev`
pub struct DevCommand;

impl DevCommand {
    fn print_usage() {
        eprintln!(
            "Usage: cargo dev [serve|build] [trunk args]\n\
             \n\
             Subcommands:\n\
               (default)           Same as `serve`\n\
               serve [trunk args]  Start the trunk dev server in the foreground\n\
               build [trunk args]  Build a dev static bundle via trunk (non-release)\n\
             \n\
             Host, port, and browser-open defaults come from `{DEV_SERVER_CONFIG_FILE}`.\n"
        );
    }
}

impl XtaskCommand for DevCommand {
    type Options = DevOptions;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        Ok(match args.first().map(String::as_str) {
            None => DevOptions::Serve(Vec::new()),
            Some("serve") => DevOptions::Serve(args[1..].to_vec()),
            Some("build") => DevOptions::Build(args[1..].to_vec()),
            Some("help" | "--help" | "-h") => DevOptions::Help,
            _ => DevOptions::Serve(args.to_vec()),
        })
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        match options {
            DevOptions::Serve(extra) => {
                ctx.process().ensure_command("trunk", TRUNK_HINT)?;
                let config = load_dev_server_config(ctx)?;
                println!(
                    "dev server: http://{}:{}/",
                    config.default_host, config.default_port
                );
                ctx.process()
                    .run_trunk(&ctx.site_dir(), trunk_serve_args(&config, extra))
                    .map_err(|err| err.with_operation("dev serve"))
            }
            DevOptions::Build(extra) => trunk_build(ctx, BuildProfile::Dev, extra),
            DevOptions::Help => {
                Self::print_usage();
                Ok(())
            }
        }
    }
}

/// `cargo build-web`
pub struct BuildWebCommand;

impl XtaskCommand for BuildWebCommand {
    type Options = Vec<String>;

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        Ok(args.to_vec())
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> XtaskResult<()> {
        trunk_build(ctx, BuildProfile::Release, options)
    }
}

/// `cargo check-web`
pub struct CheckWebCommand;

impl CheckWebCommand {
    pub(crate) fn check(ctx: &CommandContext) -> XtaskResult<()> {
        ctx.process().run(
            ctx.root(),
            "cargo",
            vec!["check", "-p", SITE_PACKAGE, "--features", SITE_CARGO_FEATURE],
        )?;

        if ctx.process().wasm_target_installed() {
            ctx.process().run(
                ctx.root(),
                "cargo",
                vec![
                    "check",
                    "-p",
                    SITE_PACKAGE,
                    "--target",
                    WASM_TARGET,
                    "--features",
                    SITE_CARGO_FEATURE,
                ],
            )
        } else {
            eprintln!("warning: {WASM_TARGET} target not installed; skipping wasm cargo check");
            Ok(())
        }
    }
}

impl XtaskCommand for CheckWebCommand {
    type Options = ();

    fn parse(args: &[String]) -> XtaskResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(XtaskError::validation(
                "`cargo check-web` does not accept extra arguments",
            ))
        }
    }

    fn run(ctx: &CommandContext, _options: Self::Options) -> XtaskResult<()> {
        Self::check(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::XtaskErrorCategory;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn config() -> DevServerConfig {
        DevServerConfig {
            default_host: "127.0.0.1".into(),
            default_port: 8080,
            open_browser: true,
        }
    }

    #[test]
    fn dev_parse_defaults_to_serve_and_passes_through_unknown_args() {
        assert_eq!(DevCommand::parse(&[]), Ok(DevOptions::Serve(Vec::new())));
        assert_eq!(
            DevCommand::parse(&strings(&["build", "--release"])),
            Ok(DevOptions::Build(strings(&["--release"])))
        );
        assert_eq!(
            DevCommand::parse(&strings(&["--port", "9000"])),
            Ok(DevOptions::Serve(strings(&["--port", "9000"])))
        );
        assert_eq!(DevCommand::parse(&strings(&["-h"])), Ok(DevOptions::Help));
    }

    #[test]
    fn serve_args_fill_defaults_from_config() {
        assert_eq!(
            trunk_serve_args(&config(), Vec::new()),
            strings(&[
                "serve",
                "index.html",
                "--address",
                "127.0.0.1",
                "--port",
                "8080",
                "--open",
                "--no-sri=true",
            ])
        );
    }

    #[test]
    fn serve_args_respect_explicit_overrides() {
        let mut quiet = config();
        quiet.open_browser = false;
        assert_eq!(
            trunk_serve_args(&quiet, strings(&["--port=9000", "--no-sri=false"])),
            strings(&[
                "serve",
                "index.html",
                "--address",
                "127.0.0.1",
                "--port=9000",
                "--no-sri=false",
            ])
        );
    }

    #[test]
    fn build_args_differ_by_profile() {
        assert_eq!(
            trunk_build_args(BuildProfile::Release, Vec::new()),
            strings(&["build", "index.html", "--release", "--dist", "../../target/trunk-dist"])
        );
        assert_eq!(
            trunk_build_args(BuildProfile::Dev, strings(&["--dist", "out"])),
            strings(&["build", "index.html", "--no-sri=true", "--dist", "out"])
        );
    }

    #[test]
    fn dev_server_config_validation_rejects_blank_host_and_zero_port() {
        let mut blank = config();
        blank.default_host = " ".into();
        assert_eq!(
            blank.validate().expect_err("blank host").category,
            XtaskErrorCategory::Config
        );

        let mut zero = config();
        zero.default_port = 0;
        assert!(zero.validate().is_err());
    }

    #[test]
    fn shipped_dev_server_config_loads() {
        let ctx = CommandContext::new().expect("context");
        let loaded = load_dev_server_config(&ctx).expect("dev server config");
        assert_eq!(loaded.default_host, "127.0.0.1");
        assert_eq!(loaded.default_port, 8080);
    }

    #[test]
    fn argument_free_commands_reject_extras() {
        assert!(SetupWebCommand::parse(&[]).is_ok());
        assert!(SetupWebCommand::parse(&strings(&["x"])).is_err());
        assert!(CheckWebCommand::parse(&strings(&["x"])).is_err());
    }
}
