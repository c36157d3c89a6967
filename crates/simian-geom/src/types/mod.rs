// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the event generator (point, size, rect).
//!
//! Containment notes:
//! - `Rect::contains_point` is half-open (`min <= p < max`), matching the
//!   range of a unit-interval draw scaled by the rect size.
//! - `Rect::contains_rect` is inclusive on edges with an `EPSILON` slack so
//!   rounding in placement math does not report spurious escapes.

#[doc = "Points and sizes in screen space."]
pub mod point;
#[doc = "Validated axis-aligned rectangles."]
pub mod rect;
