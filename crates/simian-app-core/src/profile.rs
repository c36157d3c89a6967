// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Run profiles: the persisted description of one monkey run.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use simian_core::{
    Actuator, Driver, GestureKind, Monkey, MonkeyError, Preset, RunLimit, TapOptions,
    DEFAULT_ALERT_INTERVAL, DEFAULT_PANEL_MARGIN,
};
use simian_geom::Rect;
use tracing::info;

use crate::config::ConfigError;

/// Key the CLI reads and writes when no profile is named.
pub const DEFAULT_PROFILE: &str = "default";

/// How long a run lasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitSpec {
    /// Fixed number of ticks.
    Iterations(u64),
    /// Wall-clock seconds.
    Seconds(f64),
    /// Until an action fails.
    Forever,
}

impl Default for LimitSpec {
    fn default() -> Self {
        Self::Iterations(1000)
    }
}

/// An extra weighted gesture on top of the preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSpec {
    /// Gesture to generate.
    pub gesture: GestureKind,
    /// Relative weight; must be finite and positive.
    pub weight: f64,
}

/// Persisted run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonkeyConfig {
    /// Fixed seed, or `None` to derive one from the clock.
    pub seed: Option<u32>,
    /// Screen frame events are generated in.
    pub frame: Rect,
    /// Run length.
    pub limit: LimitSpec,
    /// Preset gesture set registered first.
    pub preset: Preset,
    /// Extra weighted gestures, registered after the preset.
    pub actions: Vec<ActionSpec>,
    /// Tap tuning shared by every tap action.
    pub tap: TapOptions,
    /// Ticks between alert checks; `None` disables the alert action.
    pub alert_interval: Option<u64>,
    /// Height of the top and bottom strips drags never start in.
    pub panel_margin: f64,
}

impl Default for MonkeyConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame: Rect::PHONE_PORTRAIT,
            limit: LimitSpec::default(),
            preset: Preset::Touch,
            actions: Vec::new(),
            tap: TapOptions::default(),
            alert_interval: Some(DEFAULT_ALERT_INTERVAL),
            panel_margin: DEFAULT_PANEL_MARGIN,
        }
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn check_probability(name: &str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {p}")))
    }
}

impl MonkeyConfig {
    /// Rejects values the scheduler would refuse or misbehave on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame.is_empty() {
            return Err(invalid("frame must have a positive width and height"));
        }
        match self.limit {
            LimitSpec::Iterations(0) => return Err(invalid("iterations must be at least 1")),
            LimitSpec::Seconds(s) if !(s.is_finite() && s >= 0.0) => {
                return Err(invalid(format!(
                    "seconds must be finite and non-negative, got {s}"
                )))
            }
            _ => {}
        }
        for spec in &self.actions {
            if !(spec.weight.is_finite() && spec.weight > 0.0) {
                return Err(invalid(format!(
                    "weight for {} must be finite and positive, got {}",
                    spec.gesture.name(),
                    spec.weight
                )));
            }
        }
        if self.alert_interval == Some(0) {
            return Err(invalid("alert_interval must be at least 1"));
        }
        if !(self.panel_margin.is_finite() && self.panel_margin >= 0.0) {
            return Err(invalid(format!(
                "panel_margin must be finite and non-negative, got {}",
                self.panel_margin
            )));
        }
        check_probability("tap.multiple_tap_probability", self.tap.multiple_tap_probability)?;
        check_probability(
            "tap.multiple_touch_probability",
            self.tap.multiple_touch_probability,
        )?;
        check_probability("tap.long_press_probability", self.tap.long_press_probability)?;
        Ok(())
    }

    /// Scheduler stopping condition for this profile.
    pub fn run_limit(&self) -> Result<RunLimit, ConfigError> {
        match self.limit {
            LimitSpec::Iterations(0) => Err(invalid("iterations must be at least 1")),
            LimitSpec::Iterations(n) => Ok(RunLimit::Iterations(n)),
            LimitSpec::Seconds(s) => Duration::try_from_secs_f64(s)
                .map(RunLimit::Duration)
                .map_err(|e| invalid(format!("seconds: {e}"))),
            LimitSpec::Forever => Ok(RunLimit::Forever),
        }
    }

    /// Validates the profile and builds a scheduler with its preset, extra
    /// actions, and alert action registered in that order.
    pub fn build<A>(&self) -> Result<Monkey<Driver<A>>, ConfigError>
    where
        A: Actuator + 'static,
    {
        self.validate()?;
        let mut monkey = Monkey::new(self.seed, self.frame);
        monkey.set_panel_margin(self.panel_margin);
        self.register(&mut monkey).map_err(|e| invalid(e.to_string()))?;
        info!(
            seed = monkey.seed(),
            preset = ?self.preset,
            extra_actions = self.actions.len(),
            total_weight = monkey.total_weight(),
            "monkey configured"
        );
        Ok(monkey)
    }

    fn register<A>(&self, monkey: &mut Monkey<Driver<A>>) -> Result<(), MonkeyError>
    where
        A: Actuator + 'static,
    {
        monkey.add_preset(self.preset, self.tap)?;
        for spec in &self.actions {
            monkey.add_gesture(spec.gesture, spec.weight, self.tap)?;
        }
        if let Some(interval) = self.alert_interval {
            monkey.add_alert_action(interval)?;
        }
        Ok(())
    }
}
