// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tn - turnstile CLI

mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config, run};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tn",
    version,
    about = "turnstile - distributed k-exclusion over Lamport clocks"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cluster in-process and report occupancy
    Run(run::RunArgs),
    /// Print the default configuration
    Config(config::ConfigArgs),
    /// Validate a configuration file
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::setup_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Config(args) => config::config(args),
        Commands::Check(args) => check::check(args),
    }
}
