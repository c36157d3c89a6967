// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Simian core: reproducible randomised UI event scheduling.

This crate provides:
- `Random`, a seedable PCG-XSH-RR generator whose output is identical on every
  platform for a given `(seed, sequence)` pair.
- `Monkey`, a scheduler of weighted-random actions plus fixed-interval actions.
- `Dice`, the scalar and geometry draws actions use (points, panel-safe
  points, sub-rectangles, clustered points).
- A gesture catalog (`Gesture`, `GestureKind`, `Preset`) and the `Actuator`
  seam that delivers gestures to a real target.

Determinism notes:
- All randomness flows through the scheduler's single generator. Identical
  seed, frame, and registration sequence give identical action sequences.
- Actions run synchronously on the calling thread; the scheduler never spawns.
"]

mod actions;
mod dice;
mod error;
mod gesture;
mod monkey;
mod prng;

pub use actions::{
    GestureKind, Preset, TapOptions, TouchLayout, DEFAULT_ALERT_INTERVAL, FLICK_DURATION,
    LONG_PRESS_HOLD,
};
pub use dice::{Dice, DEFAULT_PANEL_MARGIN};
pub use error::{ActionError, GestureError, MonkeyError};
pub use gesture::{Actuator, Driver, Gesture, HardwareButton, Orientation};
pub use monkey::{ActionFn, ActionId, Monkey, RunLimit, RunSummary, Tick};
pub use prng::{time_seed, Random};
pub use simian_geom::{Point, Rect, Size, SizeFraction};
