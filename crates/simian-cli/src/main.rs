// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `simian`: drive a seeded monkey from the command line.
//!
//! # Usage
//! ```text
//! simian run [--seed N] [--frame X,Y,W,H] [--iterations N | --seconds S | --forever]
//!            [--preset touch|device|none] [--alert-interval N | --no-alerts]
//!            [--profile NAME] [--config-dir DIR] [--format jsonl|summary]
//! simian config show|init [--profile NAME] [--config-dir DIR]
//! ```
//!
//! Gesture records go to stdout; logs go to stderr. Exits non-zero on invalid
//! configuration or when an action fails.

mod cli;
mod commands;
mod sink;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, replaces the flag-derived level entirely.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Config { action } => commands::config(action),
    }
}
