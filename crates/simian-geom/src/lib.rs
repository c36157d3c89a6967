// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for Simian.

This crate provides:
- Screen-space points (`Point`) and sizes (`Size`).
- Validated axis-aligned rectangles (`Rect`) with the placement helpers the
  event generator builds on (`point_at`, `sub_square_around`, `inset_vertical`).

Design notes:
- No ambient RNG: callers supply unit-interval fractions, so identical inputs
  always produce identical geometry.
- `f64` throughout; screen coordinates are points, origin top-left.
"]

/// Foundational geometric types.
pub mod types;

pub use types::point::{Point, Size};
pub use types::rect::{GeomError, Rect, SizeFraction, EPSILON};
