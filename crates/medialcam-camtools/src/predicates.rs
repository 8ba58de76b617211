//! Robust geometric predicates
//!
//! Thin wrappers over Shewchuk's adaptive-precision predicates from the
//! `robust` crate. The triangulation decides every orientation and
//! in-circle test through these functions, so nearly collinear or cocircular
//! boundary samples are classified exactly.

use medialcam_core::Point2D;
use robust::{incircle as robust_incircle, orient2d as robust_orient2d, Coord};

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `c` lies to the left of the directed line `a -> b`.
    CounterClockwise,
    /// `c` lies to the right of the directed line `a -> b`.
    Clockwise,
    /// The three points are collinear.
    Collinear,
}

#[inline]
fn coord(p: &Point2D) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Raw orientation determinant: twice the signed area of `a, b, c`.
#[inline]
pub fn orient2d_raw(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    robust_orient2d(coord(a), coord(b), coord(c))
}

/// Orientation of three points.
#[inline]
pub fn orient2d(a: &Point2D, b: &Point2D, c: &Point2D) -> Orientation {
    let det = orient2d_raw(a, b, c);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// True when `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `a, b, c`.
#[inline]
pub fn in_circumcircle(a: &Point2D, b: &Point2D, c: &Point2D, d: &Point2D) -> bool {
    robust_incircle(coord(a), coord(b), coord(c), coord(d)) > 0.0
}

/// Circumcentre of triangle `a, b, c`, `None` for a degenerate triangle.
pub fn circumcenter(a: &Point2D, b: &Point2D, c: &Point2D) -> Option<Point2D> {
    if orient2d(a, b, c) == Orientation::Collinear {
        return None;
    }
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 {
        return None;
    }
    let b_sq = bx * bx + by * by;
    let c_sq = cx * cx + cy * cy;
    let ux = (cy * b_sq - by * c_sq) / d;
    let uy = (bx * c_sq - cx * b_sq) / d;
    let center = Point2D::new(a.x + ux, a.y + uy);
    center.is_finite().then_some(center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_orientation() {
        assert_eq!(
            orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.5, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.5, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orient2d(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn test_in_circumcircle() {
        let a = p(0.0, 0.0);
        let b = p(2.0, 0.0);
        let c = p(0.0, 2.0);
        assert!(in_circumcircle(&a, &b, &c, &p(1.0, 1.0)));
        assert!(!in_circumcircle(&a, &b, &c, &p(5.0, 5.0)));
        // Exactly cocircular is not strictly inside
        assert!(!in_circumcircle(&a, &b, &c, &p(2.0, 2.0)));
    }

    #[test]
    fn test_circumcenter() {
        let c = circumcenter(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 2.0)).unwrap();
        assert!((c.x - 1.0).abs() < 1e-12);
        assert!((c.y - 1.0).abs() < 1e-12);
        assert!(circumcenter(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)).is_none());
    }
}
