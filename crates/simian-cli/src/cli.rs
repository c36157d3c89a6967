// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use simian_core::Preset;
use simian_geom::Rect;

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "simian", author, version, about = "Seeded randomised UI event generator")]
pub struct Cli {
    /// Log at debug level (RUST_LOG still wins when set).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a gesture stream from a profile plus flag overrides.
    Run(RunArgs),
    /// Inspect or initialise stored profiles.
    Config {
        /// Profile operation.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where profiles are stored and which one to use.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Profile name.
    #[arg(long, default_value = simian_app_core::profile::DEFAULT_PROFILE)]
    pub profile: String,
    /// Directory holding profiles (defaults to the platform config dir).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

/// Arguments for `simian run`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("limit").args(["iterations", "seconds", "forever"])))]
pub struct RunArgs {
    /// Profile selection.
    #[command(flatten)]
    pub store: StoreArgs,
    /// Generator seed; omit to derive one from the clock.
    #[arg(long)]
    pub seed: Option<u32>,
    /// Screen frame as `X,Y,WIDTH,HEIGHT`.
    #[arg(long, value_parser = parse_frame)]
    pub frame: Option<Rect>,
    /// Run exactly this many ticks.
    #[arg(long)]
    pub iterations: Option<u64>,
    /// Run for this many seconds.
    #[arg(long)]
    pub seconds: Option<f64>,
    /// Run until an action fails.
    #[arg(long)]
    pub forever: bool,
    /// Preset gesture set.
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
    /// Ticks between alert checks.
    #[arg(long, conflicts_with = "no_alerts")]
    pub alert_interval: Option<u64>,
    /// Disable the alert action.
    #[arg(long)]
    pub no_alerts: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Jsonl)]
    pub format: Format,
}

/// Profile operations.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the stored profile (or the defaults) as JSON.
    Show(StoreArgs),
    /// Write the default profile.
    Init {
        /// Profile selection.
        #[command(flatten)]
        store: StoreArgs,
        /// Overwrite an existing profile.
        #[arg(long)]
        force: bool,
    },
}

/// Output format for `run`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON gesture record per line.
    Jsonl,
    /// Per-gesture counts as a table.
    Summary,
}

/// Preset names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetArg {
    /// Touch-screen gestures.
    Touch,
    /// Touch plus device events.
    Device,
    /// No preset.
    None,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Touch => Self::Touch,
            PresetArg::Device => Self::Device,
            PresetArg::None => Self::None,
        }
    }
}

fn parse_frame(raw: &str) -> Result<Rect, String> {
    let parts = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("frame components must be numbers: {e}"))?;
    let [x, y, w, h] = parts[..] else {
        return Err(format!("expected X,Y,WIDTH,HEIGHT, got {} values", parts.len()));
    };
    Rect::new(x, y, w, h).map_err(|e| e.to_string())
}
