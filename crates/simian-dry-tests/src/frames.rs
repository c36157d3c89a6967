// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Common screen frames.

use simian_geom::Rect;

/// 320x480 portrait phone screen at the origin.
pub fn portrait() -> Rect {
    Rect::PHONE_PORTRAIT
}

/// 480x320 landscape screen at the origin.
pub fn landscape() -> Rect {
    Rect::new(0.0, 0.0, 480.0, 320.0).unwrap_or(Rect::PHONE_PORTRAIT)
}
