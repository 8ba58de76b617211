//! Geometry value types
//!
//! All types here are small `Copy`-able or plain-owned values. Nothing is
//! mutated once a pipeline stage has produced it.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// True when both coordinates differ by at most `epsilon`.
    pub fn approx_eq(&self, other: &Point2D, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A cubic Bézier segment defined by four control points `P0..P3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    pub points: [Point2D; 4],
}

impl CurveSegment {
    /// Creates a segment from its four control points.
    pub const fn new(p0: Point2D, p1: Point2D, p2: Point2D, p3: Point2D) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// A straight line expressed as a cubic with control points at thirds.
    pub fn line(from: Point2D, to: Point2D) -> Self {
        Self::new(from, from.lerp(&to, 1.0 / 3.0), from.lerp(&to, 2.0 / 3.0), to)
    }

    /// Degree elevation of a quadratic Bézier (exact).
    pub fn from_quadratic(from: Point2D, ctrl: Point2D, to: Point2D) -> Self {
        Self::new(
            from,
            from.lerp(&ctrl, 2.0 / 3.0),
            to.lerp(&ctrl, 2.0 / 3.0),
            to,
        )
    }

    pub fn start(&self) -> Point2D {
        self.points[0]
    }

    pub fn end(&self) -> Point2D {
        self.points[3]
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point2D::is_finite)
    }
}

/// The ordered curve segments of one input shape, as yielded by a curve source.
///
/// A discontinuity between consecutive segments starts a new loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeCurves {
    pub segments: Vec<CurveSegment>,
}

impl ShapeCurves {
    pub fn new(segments: Vec<CurveSegment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// A point on the approximate medial axis tagged with its distance to the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MedialPoint {
    pub position: Point2D,
    /// Minimum distance to any boundary loop (always >= 0).
    pub distance_to_boundary: f64,
}

impl MedialPoint {
    pub fn new(position: Point2D, distance_to_boundary: f64) -> Self {
        Self {
            position,
            distance_to_boundary,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl BoundingBox {
    /// Bounding box of a point set, `None` when the set is empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        for p in iter {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2D {
        self.min.lerp(&self.max, 0.5)
    }
}
