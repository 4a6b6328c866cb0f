//! Points, segments and distance helpers
//!
//! Points carry a zero-sized marker naming the coordinate space they live in.
//! Surface points are pixels on the drawing surface, content points are pixels
//! of the source image. Crossing between the two goes through
//! [`crate::transform::TransformTracker`].

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// Marker for drawing-surface coordinates (device pixels)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {}

/// Marker for image coordinates (recovered through the inverse transform)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Content {}

/// A 2D point tagged with its coordinate space
pub struct Point<S> {
    pub x: f64,
    pub y: f64,
    space: PhantomData<S>,
}

/// Point in drawing-surface space
pub type SurfacePoint = Point<Surface>;
/// Point in image space
pub type ContentPoint = Point<Content>;

impl<S> Point<S> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Round both coordinates to whole pixels, halves towards +∞
    pub fn round(self) -> Self {
        Self::new((self.x + 0.5).floor(), (self.y + 0.5).floor())
    }

    /// Scale as a vector from the origin
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean length as a vector from the origin
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

// Manual impls so the marker type does not need to implement anything.
impl<S> Clone for Point<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Point<S> {}

impl<S> PartialEq for Point<S> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<S> Default for Point<S> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<S> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<S> Add for Point<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S> Sub for Point<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Line segment between two image-space endpoints
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Segment {
    pub start: ContentPoint,
    pub end: ContentPoint,
}

impl Segment {
    pub fn new(start: ContentPoint, end: ContentPoint) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        squared_distance(self.start, self.end).sqrt()
    }

    /// Distance from `p` to the line through this segment
    pub fn distance_to(&self, p: ContentPoint) -> f64 {
        distance_to_segment(p, self.start, self.end)
    }
}

/// Squared Euclidean distance between two points
#[inline]
pub fn squared_distance<S>(p: Point<S>, q: Point<S>) -> f64 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

/// Distance from `p` to the infinite line through `v` and `w`
///
/// The projection parameter is not clamped, so points beyond either endpoint
/// measure against the extended line. When `v == w` the result is the
/// *squared* distance from `p` to `v`; callers comparing against thresholds
/// must keep that in mind.
pub fn distance_to_segment<S>(p: Point<S>, v: Point<S>, w: Point<S>) -> f64 {
    let l2 = squared_distance(v, w);
    if l2 == 0.0 {
        return squared_distance(p, v);
    }

    let t = ((p.x - v.x) * (w.x - v.x) + (p.y - v.y) * (w.y - v.y)) / l2;
    let projected = Point::new(v.x + t * (w.x - v.x), v.y + t * (w.y - v.y));
    squared_distance(p, projected).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> ContentPoint {
        ContentPoint::new(x, y)
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(pt(0.0, 0.0), pt(3.0, 4.0)), 25.0);
        assert_eq!(squared_distance(pt(-1.0, 2.0), pt(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_distance_to_horizontal_segment() {
        let d = distance_to_segment(pt(5.0, 5.0), pt(0.0, 0.0), pt(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_is_not_clamped_to_endpoints() {
        // Beyond the end of the segment, but 3 away from the extended line
        let d = distance_to_segment(pt(25.0, -3.0), pt(0.0, 0.0), pt(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_diagonal_segment() {
        let d = distance_to_segment(pt(0.0, 2.0), pt(0.0, 0.0), pt(2.0, 2.0));
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment_returns_squared_distance() {
        let p = pt(3.0, 4.0);
        let v = pt(0.0, 0.0);
        assert_eq!(distance_to_segment(p, v, v), squared_distance(p, v));
        assert_eq!(distance_to_segment(p, v, v), 25.0);
    }

    #[test]
    fn test_segment_helpers() {
        let seg = Segment::new(pt(1.0, 1.0), pt(4.0, 5.0));
        assert!((seg.length() - 5.0).abs() < 1e-12);
        assert!(seg.distance_to(pt(1.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = pt(1.5, -2.0);
        let b = pt(0.5, 1.0);
        assert_eq!(a - b, pt(1.0, -3.0));
        assert_eq!(a + b, pt(2.0, -1.0));
        assert_eq!(pt(1.4, 2.6).round(), pt(1.0, 3.0));
        assert_eq!(pt(2.5, -2.5).round(), pt(3.0, -2.0));
        assert_eq!(pt(-0.5, -1.51).round(), pt(0.0, -2.0));
        assert_eq!(pt(3.0, 4.0).length(), 5.0);
    }
}
