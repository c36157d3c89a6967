// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Weighted-random and fixed-interval action scheduler.
//!
//! Ordering invariants:
//! - A tick is one weighted draw followed by one interval check, always in
//!   that order.
//! - Weighted actions are selected by cumulative weight in registration order;
//!   each action's probability is `weight / total_weight` at draw time.
//! - Every interval action due on a tick fires, in registration order. None is
//!   skipped because another one with a colliding interval fired first.
//! - All randomness flows through the single generator owned here, so equal
//!   seeds, frames, and registration sequences replay identical runs.

use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use simian_geom::Rect;
use tracing::{debug, error, info, instrument, trace};

use crate::dice::{Dice, DEFAULT_PANEL_MARGIN};
use crate::error::{ActionError, MonkeyError};
use crate::prng::{time_seed, Random};

/// Boxed action callback.
///
/// Receives the scheduler's [`Dice`] for draws and the caller-owned context
/// passed to the run loop. Callbacks never hold a reference to the scheduler.
pub type ActionFn<C> = Box<dyn FnMut(&mut Dice<'_>, &mut C) -> Result<(), ActionError>>;

/// Position of a registered action within its table (weighted or interval).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl ActionId {
    /// Zero-based registration index.
    pub fn index(self) -> usize {
        self.0
    }
}

struct WeightedAction<C> {
    name: &'static str,
    weight: f64,
    cumulative: f64,
    action: ActionFn<C>,
}

struct IntervalAction<C> {
    name: &'static str,
    interval: NonZeroU64,
    action: ActionFn<C>,
}

/// Stopping condition for [`Monkey::run_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLimit {
    /// Exactly this many ticks.
    Iterations(u64),
    /// Ticks until at least this much wall-clock time has passed (minimum one tick).
    Duration(Duration),
    /// Ticks until an action fails.
    Forever,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// 1-based tick index.
    pub index: u64,
    /// Weighted action that fired, if any were registered.
    pub random: Option<ActionId>,
    /// Number of interval actions that fired.
    pub regular: usize,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Weighted actions invoked.
    pub random_fired: u64,
    /// Interval actions invoked.
    pub regular_fired: u64,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
}

/// Randomised UI-event scheduler.
///
/// Owns the generator, the frame events are generated in, a table of weighted
/// actions, and a table of interval actions. `C` is the caller-owned context
/// every action receives (for built-in gestures, a
/// [`Driver`](crate::Driver)).
pub struct Monkey<C> {
    seed: u32,
    random: Random,
    frame: Rect,
    panel_margin: f64,
    random_actions: Vec<WeightedAction<C>>,
    total_weight: f64,
    regular_actions: Vec<IntervalAction<C>>,
    ticks: u64,
}

impl<C> Monkey<C> {
    /// Creates a scheduler for `frame`.
    ///
    /// With `Some(seed)` the run is fully reproducible; with `None` the seed is
    /// derived from wall-clock time (see [`Monkey::seed`] to log it).
    pub fn new(seed: Option<u32>, frame: Rect) -> Self {
        let seed = seed.unwrap_or_else(time_seed);
        Self {
            seed,
            random: Random::from_seed(seed),
            frame,
            panel_margin: DEFAULT_PANEL_MARGIN,
            random_actions: Vec::new(),
            total_weight: 0.0,
            regular_actions: Vec::new(),
            ticks: 0,
        }
    }

    /// Creates a reproducible scheduler.
    pub fn seeded(seed: u32, frame: Rect) -> Self {
        Self::new(Some(seed), frame)
    }

    /// Seed the generator was initialised with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Frame events are generated in.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Sum of all registered weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sets the height of the top and bottom strips that
    /// [`Dice::random_point_avoiding_panels`] skips. Negative or NaN margins
    /// are treated as zero.
    pub fn set_panel_margin(&mut self, margin: f64) {
        self.panel_margin = margin.max(0.0);
    }

    /// `(name, weight, cumulative weight)` of every weighted action, in
    /// registration order.
    pub fn weighted_actions(&self) -> impl Iterator<Item = (&'static str, f64, f64)> + '_ {
        self.random_actions
            .iter()
            .map(|a| (a.name, a.weight, a.cumulative))
    }

    /// `(name, interval)` of every interval action, in registration order.
    pub fn interval_actions(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.regular_actions
            .iter()
            .map(|a| (a.name, a.interval.get()))
    }

    /// Draw helpers over this scheduler's generator and frame.
    pub fn dice(&mut self) -> Dice<'_> {
        Dice::new(&mut self.random, self.frame, self.panel_margin)
    }

    /// Registers an action fired with probability proportional to `weight`.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidWeight`] unless `weight` is finite and
    /// positive (and keeps the running total finite). A rejected registration
    /// leaves the table unchanged.
    pub fn add_weighted_action<F>(
        &mut self,
        name: &'static str,
        weight: f64,
        action: F,
    ) -> Result<ActionId, MonkeyError>
    where
        F: FnMut(&mut Dice<'_>, &mut C) -> Result<(), ActionError> + 'static,
    {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(MonkeyError::InvalidWeight(weight));
        }
        let cumulative = self.total_weight + weight;
        if !cumulative.is_finite() {
            return Err(MonkeyError::InvalidWeight(weight));
        }
        self.total_weight = cumulative;
        let id = ActionId(self.random_actions.len());
        self.random_actions.push(WeightedAction {
            name,
            weight,
            cumulative,
            action: Box::new(action),
        });
        debug!(name, weight, cumulative, "registered weighted action");
        Ok(id)
    }

    /// Registers an action fired on every tick that is a multiple of `interval`.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidInterval`] when `interval` is zero.
    pub fn add_interval_action<F>(
        &mut self,
        name: &'static str,
        interval: u64,
        action: F,
    ) -> Result<ActionId, MonkeyError>
    where
        F: FnMut(&mut Dice<'_>, &mut C) -> Result<(), ActionError> + 'static,
    {
        let interval = NonZeroU64::new(interval).ok_or(MonkeyError::InvalidInterval)?;
        let id = ActionId(self.regular_actions.len());
        self.regular_actions.push(IntervalAction {
            name,
            interval,
            action: Box::new(action),
        });
        debug!(name, interval = interval.get(), "registered interval action");
        Ok(id)
    }

    /// Draws one weighted action and invokes it.
    ///
    /// With no weighted actions registered this is a no-op and consumes no
    /// draw.
    ///
    /// # Errors
    /// Returns [`MonkeyError::Action`] if the invoked action fails.
    pub fn act_randomly(&mut self, ctx: &mut C) -> Result<Option<ActionId>, MonkeyError> {
        if self.random_actions.is_empty() {
            return Ok(None);
        }
        let x = self.random.next_f64() * self.total_weight;
        // Cumulative weights are strictly increasing, so the first entry whose
        // cumulative weight exceeds `x` is found by binary search.
        let last = self.random_actions.len() - 1;
        let index = self
            .random_actions
            .partition_point(|a| a.cumulative <= x)
            .min(last);
        trace!(x, index, "weighted draw");
        let tick = self.ticks + 1;
        let entry = &mut self.random_actions[index];
        let mut dice = Dice::new(&mut self.random, self.frame, self.panel_margin);
        (entry.action)(&mut dice, ctx).map_err(|source| MonkeyError::Action {
            name: entry.name,
            tick,
            source,
        })?;
        debug!(tick, action = entry.name, "weighted action fired");
        Ok(Some(ActionId(index)))
    }

    /// Advances the tick counter and invokes every interval action due on it.
    ///
    /// # Errors
    /// Returns [`MonkeyError::Action`] for the first action that fails; later
    /// due actions on the same tick are not invoked.
    pub fn act_regularly(&mut self, ctx: &mut C) -> Result<usize, MonkeyError> {
        self.ticks += 1;
        let tick = self.ticks;
        let mut fired = 0;
        for entry in &mut self.regular_actions {
            if tick % entry.interval.get() != 0 {
                continue;
            }
            let mut dice = Dice::new(&mut self.random, self.frame, self.panel_margin);
            (entry.action)(&mut dice, ctx).map_err(|source| MonkeyError::Action {
                name: entry.name,
                tick,
                source,
            })?;
            debug!(tick, action = entry.name, "interval action fired");
            fired += 1;
        }
        Ok(fired)
    }

    /// Runs one tick: [`act_randomly`](Self::act_randomly) then
    /// [`act_regularly`](Self::act_regularly).
    ///
    /// # Errors
    /// Propagates the first action failure.
    pub fn tick(&mut self, ctx: &mut C) -> Result<Tick, MonkeyError> {
        let random = self.act_randomly(ctx)?;
        let regular = self.act_regularly(ctx)?;
        Ok(Tick {
            index: self.ticks,
            random,
            regular,
        })
    }

    /// Runs exactly `iterations` ticks.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidIterations`] for zero iterations and stops
    /// at the first action failure.
    #[instrument(skip(self, ctx), fields(seed = self.seed))]
    pub fn run(&mut self, iterations: u64, ctx: &mut C) -> Result<RunSummary, MonkeyError> {
        if iterations == 0 {
            return Err(MonkeyError::InvalidIterations);
        }
        info!(frame = ?self.frame, "monkey run started");
        let started = Instant::now();
        let mut summary = RunSummary::default();
        for _ in 0..iterations {
            self.step(ctx, &mut summary).inspect_err(log_abort)?;
        }
        summary.elapsed = started.elapsed();
        log_finished(&summary);
        Ok(summary)
    }

    /// Runs ticks until `duration` has elapsed, checking after each tick.
    ///
    /// At least one tick always runs.
    ///
    /// # Errors
    /// Stops at the first action failure.
    #[instrument(skip(self, ctx), fields(seed = self.seed))]
    pub fn run_for(&mut self, duration: Duration, ctx: &mut C) -> Result<RunSummary, MonkeyError> {
        info!(frame = ?self.frame, "monkey run started");
        let started = Instant::now();
        let mut summary = RunSummary::default();
        loop {
            self.step(ctx, &mut summary).inspect_err(log_abort)?;
            if started.elapsed() >= duration {
                break;
            }
        }
        summary.elapsed = started.elapsed();
        log_finished(&summary);
        Ok(summary)
    }

    /// Runs ticks until an action fails; only ever returns that failure.
    ///
    /// # Errors
    /// Always: the first action failure ends the loop.
    #[instrument(skip(self, ctx), fields(seed = self.seed))]
    pub fn run_forever(&mut self, ctx: &mut C) -> Result<Infallible, MonkeyError> {
        info!(frame = ?self.frame, "monkey run started (unbounded)");
        let mut summary = RunSummary::default();
        loop {
            self.step(ctx, &mut summary).inspect_err(log_abort)?;
        }
    }

    /// Dispatches to [`run`](Self::run), [`run_for`](Self::run_for), or
    /// [`run_forever`](Self::run_forever).
    ///
    /// # Errors
    /// As the selected loop.
    pub fn run_with(&mut self, limit: RunLimit, ctx: &mut C) -> Result<RunSummary, MonkeyError> {
        match limit {
            RunLimit::Iterations(n) => self.run(n, ctx),
            RunLimit::Duration(d) => self.run_for(d, ctx),
            RunLimit::Forever => self.run_forever(ctx).map(|never| match never {}),
        }
    }

    fn step(&mut self, ctx: &mut C, summary: &mut RunSummary) -> Result<(), MonkeyError> {
        let tick = self.tick(ctx)?;
        summary.ticks += 1;
        summary.random_fired += u64::from(tick.random.is_some());
        summary.regular_fired += tick.regular as u64;
        Ok(())
    }
}

fn log_abort(err: &MonkeyError) {
    error!(error = %err, "monkey run aborted");
}

fn log_finished(summary: &RunSummary) {
    info!(
        ticks = summary.ticks,
        random_fired = summary.random_fired,
        regular_fired = summary.regular_fired,
        elapsed_ms = summary.elapsed.as_millis(),
        "monkey run finished"
    );
}

impl<C> fmt::Debug for Monkey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monkey")
            .field("seed", &self.seed)
            .field("frame", &self.frame)
            .field("weighted", &self.random_actions.len())
            .field("total_weight", &self.total_weight)
            .field("interval", &self.regular_actions.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn frame() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0).unwrap()
    }

    #[test]
    fn cumulative_weights_track_running_total() {
        let mut monkey: Monkey<()> = Monkey::seeded(0, frame());
        monkey.add_weighted_action("a", 2.0, |_, _| Ok(())).unwrap();
        monkey.add_weighted_action("b", 0.5, |_, _| Ok(())).unwrap();
        monkey.add_weighted_action("c", 1.5, |_, _| Ok(())).unwrap();
        let cumulative: Vec<f64> = monkey.weighted_actions().map(|(_, _, c)| c).collect();
        assert_eq!(cumulative, vec![2.0, 2.5, 4.0]);
        assert!((monkey.total_weight() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejected_weights_leave_table_untouched() {
        let mut monkey: Monkey<()> = Monkey::seeded(0, frame());
        monkey.add_weighted_action("a", 1.0, |_, _| Ok(())).unwrap();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                monkey.add_weighted_action("bad", bad, |_, _| Ok(())),
                Err(MonkeyError::InvalidWeight(_))
            ));
        }
        assert_eq!(monkey.weighted_actions().count(), 1);
        assert!((monkey.total_weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overflowing_total_is_rejected() {
        let mut monkey: Monkey<()> = Monkey::seeded(0, frame());
        monkey.add_weighted_action("big", f64::MAX, |_, _| Ok(())).unwrap();
        assert!(monkey
            .add_weighted_action("bigger", f64::MAX, |_, _| Ok(()))
            .is_err());
        assert_eq!(monkey.weighted_actions().count(), 1);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut monkey: Monkey<()> = Monkey::seeded(0, frame());
        assert!(matches!(
            monkey.add_interval_action("never", 0, |_, _| Ok(())),
            Err(MonkeyError::InvalidInterval)
        ));
        assert_eq!(monkey.interval_actions().count(), 0);
    }

    #[test]
    fn empty_weighted_table_is_a_noop_without_draws() {
        let mut monkey: Monkey<()> = Monkey::seeded(9, frame());
        assert_eq!(monkey.act_randomly(&mut ()).unwrap(), None);
        let next = monkey.dice().next_u32();
        assert_eq!(next, Random::from_seed(9).next_u32());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut monkey: Monkey<()> = Monkey::seeded(0, frame());
        assert!(matches!(
            monkey.run(0, &mut ()),
            Err(MonkeyError::InvalidIterations)
        ));
        assert_eq!(monkey.ticks(), 0);
    }

    #[test]
    fn tick_reports_fired_actions() {
        let mut monkey: Monkey<Vec<&'static str>> = Monkey::seeded(0, frame());
        monkey
            .add_weighted_action("w", 1.0, |_, log: &mut Vec<&'static str>| {
                log.push("w");
                Ok(())
            })
            .unwrap();
        monkey
            .add_interval_action("every-2", 2, |_, log: &mut Vec<&'static str>| {
                log.push("i");
                Ok(())
            })
            .unwrap();
        let mut log = Vec::new();
        let first = monkey.tick(&mut log).unwrap();
        let second = monkey.tick(&mut log).unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.regular, 0);
        assert_eq!(second.index, 2);
        assert_eq!(second.regular, 1);
        assert_eq!(log, vec!["w", "w", "i"]);
    }

    #[test]
    fn seed_is_reported() {
        let monkey: Monkey<()> = Monkey::seeded(1234, frame());
        assert_eq!(monkey.seed(), 1234);
        let unseeded: Monkey<()> = Monkey::new(None, frame());
        assert_eq!(unseeded.frame(), frame());
    }
}
