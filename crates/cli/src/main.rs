// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Revet CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use revet::cli::{Cli, Command};
use revet::error::ExitCode;

mod cmd_coverage;
mod cmd_review;

fn init_logging() {
    let filter = EnvFilter::try_from_env("REVET_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("revet: {}", e);
            match e.downcast_ref::<revet::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

/// Repository path the command should operate on.
fn start_dir(cli: &Cli) -> anyhow::Result<std::path::PathBuf> {
    match &cli.repo {
        Some(path) => Ok(path.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Review(args)) => cmd_review::run(&cli, args),
        Some(Command::Coverage(args)) => cmd_coverage::run(&cli, args),
        Some(Command::Init(args)) => {
            let root = start_dir(&cli)?;
            revet::init::write_starter_config(&root, args.force)?;
            println!("Wrote {}", root.join("revet.toml").display());
            Ok(ExitCode::Success)
        }
        Some(Command::Completions(args)) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "revet",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::Success)
        }
    }
}
