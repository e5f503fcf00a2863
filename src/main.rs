//! `js-rules` command-line entry point.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use js_rules::cli::{Cli, Command};
use js_rules::{commands, logging};

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.subcommand() {
        Command::Install(opts) => {
            logging::init_subscriber(args.verbose, "install");
            commands::install::run(&args.global, &opts)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::IsWip => {
            logging::init_subscriber(args.verbose, "is-wip");
            let wip = commands::is_wip::run(&args.global)?;
            Ok(if wip {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
