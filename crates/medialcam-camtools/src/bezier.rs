//! Cubic Bézier evaluation
//!
//! Evaluates [`CurveSegment`]s at parameter values uniformly spaced over
//! `[0, 1]` (both ends included).

use medialcam_core::{CurveSegment, Point2D};

/// Samples cubic Bézier segments into discrete points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveSampler;

impl CurveSampler {
    /// Evaluate `B(t) = (1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`.
    pub fn evaluate(segment: &CurveSegment, t: f64) -> Point2D {
        let [p0, p1, p2, p3] = segment.points;
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point2D::new(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    }

    /// Produce exactly `count` points at `t = i / (count - 1)`.
    ///
    /// `count` below 2 is raised to 2 so both end points are always present.
    /// Coincident control points simply yield duplicate samples.
    pub fn sample(segment: &CurveSegment, count: usize) -> Vec<Point2D> {
        let count = count.max(2);
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                if i == 0 {
                    segment.start()
                } else if i == count - 1 {
                    segment.end()
                } else {
                    Self::evaluate(segment, i as f64 / last)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_arc() -> CurveSegment {
        // Standard cubic approximation of a unit quarter circle
        let k = 0.552_284_749_831;
        CurveSegment::new(
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, k),
            Point2D::new(k, 1.0),
            Point2D::new(0.0, 1.0),
        )
    }

    #[test]
    fn test_sample_endpoints_and_count() {
        let seg = quarter_arc();
        for n in [2usize, 3, 10, 57] {
            let pts = CurveSampler::sample(&seg, n);
            assert_eq!(pts.len(), n);
            assert_eq!(pts[0], seg.start());
            assert_eq!(pts[n - 1], seg.end());
        }
    }

    #[test]
    fn test_evaluate_matches_endpoints() {
        let seg = quarter_arc();
        assert!(CurveSampler::evaluate(&seg, 0.0).approx_eq(&seg.start(), 1e-12));
        assert!(CurveSampler::evaluate(&seg, 1.0).approx_eq(&seg.end(), 1e-12));
    }

    #[test]
    fn test_midpoint_on_quarter_circle() {
        let mid = CurveSampler::evaluate(&quarter_arc(), 0.5);
        let r = (mid.x * mid.x + mid.y * mid.y).sqrt();
        assert!((r - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segment_yields_duplicates() {
        let p = Point2D::new(2.0, 3.0);
        let seg = CurveSegment::new(p, p, p, p);
        let pts = CurveSampler::sample(&seg, 5);
        assert_eq!(pts.len(), 5);
        assert!(pts.iter().all(|q| q.approx_eq(&p, 1e-12)));
    }

    #[test]
    fn test_line_segment_is_uniform() {
        let seg = CurveSegment::line(Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0));
        let pts = CurveSampler::sample(&seg, 5);
        for (i, pt) in pts.iter().enumerate() {
            assert!((pt.x - i as f64).abs() < 1e-12);
        }
    }
}
