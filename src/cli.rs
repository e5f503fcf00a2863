//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "js-rules",
    about = "Deploy shared lint, format, and git hook configuration into a JavaScript project",
    version = option_env!("JS_RULES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Subcommand; `install` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to `install` with default options.
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Install(InstallOpts::default()))
    }
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Write configuration files one at a time instead of in parallel
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Deploy configuration files and git hooks (default)
    Install(InstallOpts),
    /// Exit 0 when the current branch is a work in progress (`wip/...`)
    IsWip,
}

/// Options for the `install` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InstallOpts {
    /// Hooks directory, relative to the project root
    #[arg(long, default_value = crate::resources::DEFAULT_HOOKS_DIR)]
    pub hooks_dir: PathBuf,

    /// Project configuration file (defaults to `<root>/js-rules.toml`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Banner written at the top of every generated file
    #[arg(long)]
    pub edit_warning: Option<String>,

    /// Take name and version from the nearest package.json above this directory
    #[arg(long)]
    pub manifest_dir: Option<PathBuf>,
}

impl Default for InstallOpts {
    fn default() -> Self {
        Self {
            hooks_dir: PathBuf::from(crate::resources::DEFAULT_HOOKS_DIR),
            config: None,
            edit_warning: None,
            manifest_dir: None,
        }
    }
}
