use medialcam_core::{CurveSegment, Point2D, ShapeCurves};

#[path = "scenarios/annulus.rs"]
mod annulus;
#[path = "scenarios/batch.rs"]
mod batch;
#[path = "scenarios/circle.rs"]
mod circle;

const KAPPA: f64 = 0.552_284_749_831;

/// Four cubic quarter arcs approximating a circle, counter-clockwise from +X.
pub fn circle_segments(cx: f64, cy: f64, r: f64) -> Vec<CurveSegment> {
    let k = KAPPA * r;
    let c = Point2D::new(cx, cy);
    let at = |dx: f64, dy: f64| Point2D::new(c.x + dx, c.y + dy);
    vec![
        CurveSegment::new(at(r, 0.0), at(r, k), at(k, r), at(0.0, r)),
        CurveSegment::new(at(0.0, r), at(-k, r), at(-r, k), at(-r, 0.0)),
        CurveSegment::new(at(-r, 0.0), at(-r, -k), at(-k, -r), at(0.0, -r)),
        CurveSegment::new(at(0.0, -r), at(k, -r), at(r, -k), at(r, 0.0)),
    ]
}

pub fn circle_shape(cx: f64, cy: f64, r: f64) -> ShapeCurves {
    ShapeCurves::new(circle_segments(cx, cy, r))
}

/// Outer circle followed by a concentric hole.
pub fn annulus_shape(cx: f64, cy: f64, outer: f64, inner: f64) -> ShapeCurves {
    let mut segments = circle_segments(cx, cy, outer);
    segments.extend(circle_segments(cx, cy, inner));
    ShapeCurves::new(segments)
}

pub fn square_shape(x0: f64, y0: f64, size: f64) -> ShapeCurves {
    let c = [
        Point2D::new(x0, y0),
        Point2D::new(x0 + size, y0),
        Point2D::new(x0 + size, y0 + size),
        Point2D::new(x0, y0 + size),
    ];
    ShapeCurves::new(
        (0..4)
            .map(|i| CurveSegment::line(c[i], c[(i + 1) % 4]))
            .collect(),
    )
}
