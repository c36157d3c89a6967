// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Random scalar and geometry draws bound to a scheduler's generator and frame.
//!
//! Every helper consumes draws from the single generator owned by the
//! [`Monkey`](crate::Monkey), so the order of calls inside an action is part of
//! the reproducible stream. Points draw `x` before `y`.

use simian_geom::{Point, Rect, SizeFraction};

use crate::error::MonkeyError;
use crate::prng::Random;

/// Height of the strips at the top and bottom of the frame that open system
/// panels when a drag starts inside them.
pub const DEFAULT_PANEL_MARGIN: f64 = 20.0;

/// Mutable view over the scheduler's generator plus the frame events target.
///
/// Handed to every action callback and obtainable from
/// [`Monkey::dice`](crate::Monkey::dice) for draws outside the run loop.
#[derive(Debug)]
pub struct Dice<'a> {
    random: &'a mut Random,
    frame: Rect,
    panel_margin: f64,
}

impl<'a> Dice<'a> {
    pub(crate) fn new(random: &'a mut Random, frame: Rect, panel_margin: f64) -> Self {
        Self {
            random,
            frame,
            panel_margin,
        }
    }

    /// Frame events are generated in.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Raw 32-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        self.random.next_u32()
    }

    /// Unit-interval draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.random.next_f64()
    }

    /// Returns `true` with the given probability (`next_f64() < probability`).
    pub fn chance(&mut self, probability: f64) -> bool {
        self.random.next_f64() < probability
    }

    /// Integer in `[0, less_than)`.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidBound`] when `less_than <= 0`; no draw is
    /// consumed in that case.
    pub fn random_int(&mut self, less_than: i32) -> Result<i32, MonkeyError> {
        if less_than <= 0 {
            return Err(MonkeyError::InvalidBound(i64::from(less_than)));
        }
        Ok(self.random.int_less_than(less_than))
    }

    /// Unsigned integer in `[0, less_than)`.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidBound`] when `less_than == 0`.
    pub fn random_uint(&mut self, less_than: u32) -> Result<u32, MonkeyError> {
        if less_than == 0 {
            return Err(MonkeyError::InvalidBound(0));
        }
        Ok(self.random.uint_less_than(less_than))
    }

    /// Index into a collection of `len` items.
    ///
    /// # Errors
    /// Returns [`MonkeyError::InvalidBound`] when `len` is zero or does not fit
    /// in 32 bits.
    pub fn random_index(&mut self, len: usize) -> Result<usize, MonkeyError> {
        let bound = u32::try_from(len)
            .map_err(|_| MonkeyError::InvalidBound(i64::try_from(len).unwrap_or(i64::MAX)))?;
        self.random_uint(bound).map(|i| i as usize)
    }

    /// Real value in `[0, less_than)`.
    pub fn random_fraction(&mut self, less_than: f64) -> f64 {
        self.random.next_f64_below(less_than)
    }

    /// Uniform point inside the frame.
    pub fn random_point(&mut self) -> Point {
        let frame = self.frame;
        self.random_point_in(&frame)
    }

    /// Uniform point inside `rect`.
    pub fn random_point_in(&mut self, rect: &Rect) -> Point {
        let fx = self.random.next_f64();
        let fy = self.random.next_f64();
        rect.point_at(fx, fy)
    }

    /// Uniform point inside the frame, excluding the panel strips at the top
    /// and bottom edges.
    pub fn random_point_avoiding_panels(&mut self) -> Point {
        let safe = self.frame.inset_vertical(self.panel_margin, self.panel_margin);
        self.random_point_in(&safe)
    }

    /// Square sub-rectangle around a random point, a third of the frame's
    /// shorter side.
    pub fn random_rect(&mut self) -> Rect {
        self.random_rect_with(SizeFraction::THIRD)
    }

    /// Square sub-rectangle around a random point, `1 / fraction` of the
    /// frame's shorter side, always contained in the frame.
    pub fn random_rect_with(&mut self, fraction: SizeFraction) -> Rect {
        let anchor = self.random_point();
        self.frame.sub_square_around(anchor, fraction)
    }

    /// Like [`random_rect_with`](Self::random_rect_with) for an unchecked divisor.
    ///
    /// # Errors
    /// Returns [`MonkeyError::Geometry`] unless `fraction` is finite and `>= 1`.
    pub fn random_rect_with_fraction(&mut self, fraction: f64) -> Result<Rect, MonkeyError> {
        let fraction = SizeFraction::new(fraction)?;
        Ok(self.random_rect_with(fraction))
    }

    /// `count` points in a loose cluster: a random centre followed by
    /// `count - 1` points drawn inside the default sub-rectangle around it.
    ///
    /// `count == 0` yields an empty vector and consumes no draws.
    pub fn random_clustered_points(&mut self, count: usize) -> Vec<Point> {
        if count == 0 {
            return Vec::new();
        }
        let centre = self.random_point();
        let cluster = self.frame.sub_square_around(centre, SizeFraction::THIRD);
        let mut points = Vec::with_capacity(count);
        points.push(centre);
        for _ in 1..count {
            points.push(self.random_point_in(&cluster));
        }
        points
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn portrait() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 480.0).unwrap()
    }

    #[test]
    fn random_point_draws_x_then_y() {
        let mut random = Random::from_seed(0);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        let p = dice.random_point();

        let mut replay = Random::from_seed(0);
        let fx = replay.next_f64();
        let fy = replay.next_f64();
        assert_eq!(p, Point::new(fx * 320.0, fy * 480.0));
    }

    #[test]
    fn invalid_bounds_do_not_consume_draws() {
        let mut random = Random::from_seed(5);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        assert!(matches!(dice.random_int(0), Err(MonkeyError::InvalidBound(0))));
        assert!(matches!(dice.random_int(-3), Err(MonkeyError::InvalidBound(-3))));
        assert!(matches!(dice.random_uint(0), Err(MonkeyError::InvalidBound(0))));
        assert!(dice.random_index(0).is_err());
        let next = dice.next_u32();
        assert_eq!(next, Random::from_seed(5).next_u32());
    }

    #[test]
    fn panel_safe_points_skip_edges() {
        let mut random = Random::from_seed(11);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        for _ in 0..2_000 {
            let p = dice.random_point_avoiding_panels();
            assert!(p.y >= 20.0 && p.y < 460.0, "{p:?}");
        }
    }

    #[test]
    fn clustered_points_share_a_neighbourhood() {
        let mut random = Random::from_seed(3);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        let points = dice.random_clustered_points(4);
        assert_eq!(points.len(), 4);
        let cluster = portrait().sub_square_around(points[0], SizeFraction::THIRD);
        for p in &points[1..] {
            assert!(cluster.contains_point(p), "{p:?} outside {cluster:?}");
        }
        assert!(dice.random_clustered_points(0).is_empty());
    }

    #[test]
    fn rect_fraction_is_validated() {
        let mut random = Random::from_seed(1);
        let mut dice = Dice::new(&mut random, portrait(), DEFAULT_PANEL_MARGIN);
        assert!(matches!(
            dice.random_rect_with_fraction(0.25),
            Err(MonkeyError::Geometry(_))
        ));
        let rect = dice.random_rect_with_fraction(2.0).unwrap();
        assert!((rect.width() - 160.0).abs() < 1e-9);
    }
}
