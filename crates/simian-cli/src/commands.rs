// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use simian_app_core::config::ConfigService;
use simian_app_core::profile::{LimitSpec, MonkeyConfig};
use simian_config_fs::FsConfigStore;
use simian_core::{Actuator, Driver, RunSummary};
use tracing::{info, instrument};

use crate::cli::{ConfigAction, Format, RunArgs, StoreArgs};
use crate::sink::{CountingActuator, JsonLinesActuator};

fn open_store(args: &StoreArgs) -> Result<ConfigService<FsConfigStore>> {
    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::at(dir)
            .with_context(|| format!("failed to open config dir {}", dir.display()))?,
        None => FsConfigStore::new().context("failed to open platform config dir")?,
    };
    Ok(ConfigService::new(store))
}

fn load_profile(service: &ConfigService<FsConfigStore>, name: &str) -> Result<MonkeyConfig> {
    service
        .load_or_default(name)
        .with_context(|| format!("failed to load profile `{name}`"))
}

/// Applies command-line overrides on top of a stored profile.
fn merge(mut config: MonkeyConfig, args: &RunArgs) -> MonkeyConfig {
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(frame) = args.frame {
        config.frame = frame;
    }
    if let Some(n) = args.iterations {
        config.limit = LimitSpec::Iterations(n);
    } else if let Some(s) = args.seconds {
        config.limit = LimitSpec::Seconds(s);
    } else if args.forever {
        config.limit = LimitSpec::Forever;
    }
    if let Some(preset) = args.preset {
        config.preset = preset.into();
    }
    if args.no_alerts {
        config.alert_interval = None;
    } else if let Some(interval) = args.alert_interval {
        config.alert_interval = Some(interval);
    }
    config
}

fn drive<A>(config: &MonkeyConfig, actuator: A) -> Result<(u32, RunSummary, A)>
where
    A: Actuator + 'static,
{
    let limit = config.run_limit().context("invalid run limit")?;
    let mut monkey = config.build::<A>().context("invalid profile")?;
    let seed = monkey.seed();
    info!(seed, ?limit, "starting run");
    let mut driver = Driver::new(actuator);
    let summary = monkey
        .run_with(limit, &mut driver)
        .with_context(|| format!("run with seed {seed} failed"))?;
    Ok((seed, summary, driver.into_inner()))
}

/// `simian run`.
#[instrument(skip_all, fields(profile = %args.store.profile))]
pub fn run(args: &RunArgs) -> Result<()> {
    let service = open_store(&args.store)?;
    let config = merge(load_profile(&service, &args.store.profile)?, args);
    config.validate().context("invalid profile")?;

    match args.format {
        Format::Jsonl => {
            let (seed, summary, mut sink) = drive(&config, JsonLinesActuator::new(io::stdout()))?;
            sink.flush().context("failed to flush stdout")?;
            info!(
                seed,
                ticks = summary.ticks,
                records = sink.written(),
                "run finished"
            );
        }
        Format::Summary => {
            let (seed, summary, counter) = drive(&config, CountingActuator::default())?;
            let mut out = io::stdout().lock();
            writeln!(out, "{}", counter.render(seed, &summary))?;
        }
    }
    Ok(())
}

/// `simian config ...`.
pub fn config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show(store) => {
            let service = open_store(store)?;
            let config = load_profile(&service, &store.profile)?;
            let json = serde_json::to_string_pretty(&config)?;
            writeln!(io::stdout().lock(), "{json}")?;
        }
        ConfigAction::Init { store, force } => {
            let service = open_store(store)?;
            if !force {
                let existing: Option<MonkeyConfig> = service
                    .load(&store.profile)
                    .with_context(|| format!("failed to read profile `{}`", store.profile))?;
                if existing.is_some() {
                    bail!(
                        "profile `{}` already exists (use --force to overwrite)",
                        store.profile
                    );
                }
            }
            service
                .save(&store.profile, &MonkeyConfig::default())
                .with_context(|| format!("failed to write profile `{}`", store.profile))?;
            let path = service.store().path_for(&store.profile)?;
            info!(path = %path.display(), "profile written");
        }
    }
    Ok(())
}
