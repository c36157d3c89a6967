// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use simian_core::{Monkey, Rect, SizeFraction};

fn frames() -> impl Strategy<Value = Rect> {
    (
        -500.0f64..500.0,
        -500.0f64..500.0,
        1.0f64..2_000.0,
        1.0f64..2_000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h).unwrap())
}

proptest! {
    #[test]
    fn random_rects_stay_inside_any_frame(
        seed in any::<u32>(),
        frame in frames(),
        fraction in 1.0f64..10.0,
    ) {
        let mut monkey: Monkey<()> = Monkey::seeded(seed, frame);
        let mut dice = monkey.dice();
        let fraction = SizeFraction::new(fraction).unwrap();
        for _ in 0..16 {
            let rect = dice.random_rect_with(fraction);
            prop_assert!(frame.contains_rect(&rect), "{rect:?} escapes {frame:?}");
            let side = frame.size().min_side() / fraction.get();
            prop_assert!((rect.width() - side).abs() < 1e-6);
            prop_assert!((rect.height() - side).abs() < 1e-6);
        }
    }

    #[test]
    fn random_points_stay_inside_any_frame(seed in any::<u32>(), frame in frames()) {
        let mut monkey: Monkey<()> = Monkey::seeded(seed, frame);
        let mut dice = monkey.dice();
        for _ in 0..32 {
            let p = dice.random_point();
            prop_assert!(frame.contains_point(&p), "{p:?} outside {frame:?}");
        }
    }

    #[test]
    fn clustered_points_have_requested_count(seed in any::<u32>(), count in 0usize..12) {
        let mut monkey: Monkey<()> = Monkey::seeded(seed, Rect::PHONE_PORTRAIT);
        let points = monkey.dice().random_clustered_points(count);
        prop_assert_eq!(points.len(), count);
    }

    #[test]
    fn bounded_ints_stay_in_range(seed in any::<u32>(), bound in 1i32..i32::MAX) {
        let mut monkey: Monkey<()> = Monkey::seeded(seed, Rect::PHONE_PORTRAIT);
        let mut dice = monkey.dice();
        for _ in 0..8 {
            let v = dice.random_int(bound).unwrap();
            prop_assert!((0..bound).contains(&v));
        }
    }
}
