// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

use super::point::{Point, Size};

/// Slack used by inclusive containment checks, in points.
pub const EPSILON: f64 = 1e-9;

/// Errors produced when constructing or deriving rectangles.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeomError {
    /// A coordinate or extent was NaN or infinite.
    #[error("rect components must be finite")]
    NonFinite,
    /// Width or height was negative.
    #[error("rect size must be non-negative, got {width}x{height}")]
    NegativeSize {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },
    /// A sub-rectangle size fraction was below 1 or not finite.
    #[error("size fraction must be a finite value >= 1, got {0}")]
    InvalidFraction(f64),
}

/// Axis-aligned rectangle in screen space.
///
/// Invariants:
/// - All components are finite.
/// - `width >= 0` and `height >= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RectRepr", into = "RectRepr")
)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// A 320x480 frame at the origin, the logical screen of a small portrait phone.
    pub const PHONE_PORTRAIT: Self = Self {
        origin: Point::ZERO,
        size: Size {
            width: 320.0,
            height: 480.0,
        },
    };

    /// Constructs a rectangle from its origin and extents.
    ///
    /// # Errors
    /// Returns [`GeomError::NonFinite`] for NaN/infinite input and
    /// [`GeomError::NegativeSize`] when an extent is negative.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeomError> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(GeomError::NonFinite);
        }
        if width < 0.0 || height < 0.0 {
            return Err(GeomError::NegativeSize { width, height });
        }
        Ok(Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        })
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Extents.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width in points.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height in points.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Left edge.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Top edge.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Right edge.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns `true` if the rect has zero area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Maps unit-interval fractions to a point inside the rect.
    ///
    /// `fx = 0.0, fy = 0.0` is the origin; fractions in `[0, 1)` land in the
    /// half-open interior.
    #[must_use]
    pub fn point_at(&self, fx: f64, fy: f64) -> Point {
        Point::new(
            self.origin.x + fx * self.size.width,
            self.origin.y + fy * self.size.height,
        )
    }

    /// Half-open containment (`min <= p < max`).
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// Inclusive containment of `other`, with [`EPSILON`] slack on every edge.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.min_x() >= self.min_x() - EPSILON
            && other.min_y() >= self.min_y() - EPSILON
            && other.max_x() <= self.max_x() + EPSILON
            && other.max_y() <= self.max_y() + EPSILON
    }

    /// Shrinks the rect vertically by `top` and `bottom` margins.
    ///
    /// The height never goes below zero; an over-inset rect collapses onto the
    /// top margin.
    #[must_use]
    pub fn inset_vertical(&self, top: f64, bottom: f64) -> Self {
        let height = (self.size.height - top - bottom).max(0.0);
        Self {
            origin: Point::new(self.origin.x, self.origin.y + top.min(self.size.height)),
            size: Size::new(self.size.width, height),
        }
    }

    /// Derives a square sub-rectangle positioned around `point`.
    ///
    /// The side is `min(width, height) / fraction`. The square is placed so
    /// that `point` sits at the same relative position inside the square as it
    /// does inside `self`, which keeps the square fully inside `self`. Points
    /// outside `self` are clamped to its edges first.
    #[must_use]
    pub fn sub_square_around(&self, point: Point, fraction: SizeFraction) -> Self {
        let side = self.size.min_side() / fraction.get();
        let x = place_on_axis(point.x, self.origin.x, self.size.width, side);
        let y = place_on_axis(point.y, self.origin.y, self.size.height, side);
        Self {
            origin: Point::new(x, y),
            size: Size::new(side, side),
        }
    }
}

/// Divisor applied to a frame's shorter side when deriving a sub-square.
///
/// Always finite and `>= 1`, so the derived square fits inside its frame.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct SizeFraction(f64);

impl SizeFraction {
    /// A square one third of the shorter side.
    pub const THIRD: Self = Self(3.0);
    /// A square half of the shorter side.
    pub const HALF: Self = Self(2.0);
    /// A square as large as the shorter side.
    pub const WHOLE: Self = Self(1.0);

    /// Validates a divisor.
    ///
    /// # Errors
    /// Returns [`GeomError::InvalidFraction`] unless `value` is finite and at
    /// least `1`.
    pub fn new(value: f64) -> Result<Self, GeomError> {
        if value.is_finite() && value >= 1.0 {
            Ok(Self(value))
        } else {
            Err(GeomError::InvalidFraction(value))
        }
    }

    /// Raw divisor.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for SizeFraction {
    fn default() -> Self {
        Self::THIRD
    }
}

/// Start coordinate of a span of length `side` inside `[origin, origin + extent]`.
fn place_on_axis(p: f64, origin: f64, extent: f64, side: f64) -> f64 {
    if extent <= 0.0 {
        return origin;
    }
    let offset = (p - origin).clamp(0.0, extent);
    let start = origin + offset * (extent - side) / extent;
    start.clamp(origin, origin + (extent - side).max(0.0))
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RectRepr {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RectRepr> for Rect {
    type Error = GeomError;

    fn try_from(r: RectRepr) -> Result<Self, Self::Error> {
        Self::new(r.x, r.y, r.width, r.height)
    }
}

#[cfg(feature = "serde")]
impl From<Rect> for RectRepr {
    fn from(r: Rect) -> Self {
        Self {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite_components() {
        assert_eq!(
            Rect::new(0.0, 0.0, -1.0, 4.0),
            Err(GeomError::NegativeSize {
                width: -1.0,
                height: 4.0
            })
        );
        assert_eq!(Rect::new(f64::NAN, 0.0, 1.0, 1.0), Err(GeomError::NonFinite));
        assert_eq!(
            Rect::new(0.0, 0.0, f64::INFINITY, 1.0),
            Err(GeomError::NonFinite)
        );
    }

    #[test]
    fn point_at_maps_fractions_onto_extents() {
        let r = Rect::new(10.0, 20.0, 100.0, 200.0).unwrap();
        assert_eq!(r.point_at(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(r.point_at(0.5, 0.25), Point::new(60.0, 70.0));
    }

    #[test]
    fn sub_square_uses_shorter_side() {
        let frame = Rect::new(0.0, 0.0, 320.0, 480.0).unwrap();
        let sq = frame.sub_square_around(frame.center(), SizeFraction::HALF);
        assert!((sq.width() - 160.0).abs() < EPSILON);
        assert!((sq.height() - 160.0).abs() < EPSILON);
        assert!(frame.contains_rect(&sq));
        assert!(sq.contains_point(&frame.center()));
    }

    #[test]
    fn sub_square_at_far_corner_stays_inside_tall_frames() {
        let frame = Rect::new(0.0, 0.0, 320.0, 480.0).unwrap();
        let corner = Point::new(319.999, 479.999);
        let sq = frame.sub_square_around(corner, SizeFraction::THIRD);
        assert!(frame.contains_rect(&sq), "{sq:?} escaped {frame:?}");
    }

    #[test]
    fn size_fraction_rejects_values_below_one() {
        assert_eq!(SizeFraction::new(0.5), Err(GeomError::InvalidFraction(0.5)));
        assert!(SizeFraction::new(f64::NAN).is_err());
        assert!(SizeFraction::new(f64::INFINITY).is_err());
        assert_eq!(SizeFraction::new(1.0), Ok(SizeFraction::WHOLE));
    }

    #[test]
    fn degenerate_frames_collapse_to_origin() {
        let line = Rect::new(5.0, 5.0, 0.0, 100.0).unwrap();
        let sq = line.sub_square_around(Point::new(5.0, 50.0), SizeFraction::THIRD);
        assert_eq!(sq.origin().x, 5.0);
        assert_eq!(sq.width(), 0.0);
    }

    #[test]
    fn inset_vertical_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 100.0, 30.0).unwrap();
        let inset = r.inset_vertical(20.0, 20.0);
        assert_eq!(inset.height(), 0.0);
        assert_eq!(inset.min_y(), 20.0);
    }
}
