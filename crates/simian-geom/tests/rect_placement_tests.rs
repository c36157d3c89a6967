// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Property tests for sub-square placement inside arbitrary frames.

use proptest::prelude::*;
use simian_geom::{Point, Rect, SizeFraction};

fn frame_strategy() -> impl Strategy<Value = Rect> {
    (-500.0..500.0f64, -500.0..500.0f64, 1.0..4000.0f64, 1.0..4000.0f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h).unwrap_or_else(|e| panic!("{e}")))
}

proptest! {
    #[test]
    fn sub_square_is_always_inside_frame(
        frame in frame_strategy(),
        fx in 0.0..1.0f64,
        fy in 0.0..1.0f64,
        fraction in 1.0..50.0f64,
    ) {
        let p = frame.point_at(fx, fy);
        let fraction = SizeFraction::new(fraction).unwrap_or_else(|e| panic!("{e}"));
        let sq = frame.sub_square_around(p, fraction);
        prop_assert!(frame.contains_rect(&sq), "frame={frame:?} sq={sq:?}");
    }

    #[test]
    fn sub_square_covers_the_anchor_point(
        frame in frame_strategy(),
        fx in 0.0..1.0f64,
        fy in 0.0..1.0f64,
        fraction in 1.0..50.0f64,
    ) {
        let p = frame.point_at(fx, fy);
        let fraction = SizeFraction::new(fraction).unwrap_or_else(|e| panic!("{e}"));
        let sq = frame.sub_square_around(p, fraction);
        let slack = 1e-6;
        prop_assert!(p.x >= sq.min_x() - slack && p.x <= sq.max_x() + slack);
        prop_assert!(p.y >= sq.min_y() - slack && p.y <= sq.max_y() + slack);
    }

    #[test]
    fn anchors_outside_the_frame_are_clamped(
        frame in frame_strategy(),
        dx in -10_000.0..10_000.0f64,
        dy in -10_000.0..10_000.0f64,
    ) {
        let p = Point::new(frame.min_x() + dx, frame.min_y() + dy);
        let sq = frame.sub_square_around(p, SizeFraction::THIRD);
        prop_assert!(frame.contains_rect(&sq));
    }
}

#[test]
fn point_at_stays_in_half_open_interior() {
    let frame = Rect::new(0.0, 0.0, 320.0, 480.0).unwrap_or_else(|e| panic!("{e}"));
    let almost_one = 1.0 - f64::from(u32::MAX).recip() / 2.0;
    assert!(frame.contains_point(&frame.point_at(0.0, 0.0)));
    assert!(frame.contains_point(&frame.point_at(almost_one, almost_one)));
    assert!(!frame.contains_point(&frame.point_at(1.0, 0.5)));
}
