//! Envelope construction
//!
//! Assembles sampled Bézier segments into closed boundary loops. The first
//! loop of a shape is the outer boundary, every following loop is a hole.
//! Polygon validity (simple outer loop, holes nested and disjoint) is checked
//! here, at construction, so later stages can rely on it.
//!
//! Loops are stored as `geo` polygons; containment, boundary distance and
//! crossing tests all go through `geo` algorithms.

use crate::bezier::CurveSampler;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{
    Area, Closest, ClosestPoint, Contains, Coord, Euclidean, Intersects, Length, LineString,
    Point, Polygon,
};
use medialcam_core::{BoundingBox, CurveSegment, Point2D, ShapeError};
use tracing::debug;

/// Maximum gap between a segment's end and the next segment's start for the
/// two to belong to the same loop.
pub const CONTINUITY_EPSILON: f64 = 1e-6;

fn to_coord(p: &Point2D) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn to_point(p: &Point2D) -> Point<f64> {
    Point::new(p.x, p.y)
}

/// A closed, simple polygon ring.
///
/// The first and last stored points always coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryLoop {
    points: Vec<Point2D>,
    polygon: Polygon<f64>,
    bbox: BoundingBox,
}

impl BoundaryLoop {
    /// Builds a closed ring from sampled points.
    ///
    /// Consecutive duplicates are dropped and the ring is closed by repeating
    /// the first point if needed. Fails when fewer than three distinct
    /// vertices remain or the ring encloses no area.
    pub fn new(samples: Vec<Point2D>) -> Result<Self, ShapeError> {
        let mut points: Vec<Point2D> = Vec::with_capacity(samples.len() + 1);
        for p in samples {
            if !p.is_finite() {
                return Err(ShapeError::malformed_input(
                    "boundary contains non-finite coordinates",
                ));
            }
            if points
                .last()
                .is_some_and(|last| last.approx_eq(&p, CONTINUITY_EPSILON))
            {
                continue;
            }
            points.push(p);
        }

        // Drop a trailing near-duplicate of the start, then close exactly.
        while points.len() > 1
            && points[points.len() - 1].approx_eq(&points[0], CONTINUITY_EPSILON)
        {
            points.pop();
        }
        if points.len() < 3 {
            return Err(ShapeError::malformed_envelope(format!(
                "degenerate loop with {} distinct vertices",
                points.len()
            )));
        }
        points.push(points[0]);

        let bbox = BoundingBox::from_points(&points)
            .ok_or_else(|| ShapeError::malformed_envelope("empty loop"))?;
        let ring: LineString<f64> = points.iter().map(to_coord).collect();
        let polygon = Polygon::new(ring, Vec::new());
        if polygon.signed_area() == 0.0 {
            return Err(ShapeError::malformed_envelope("loop encloses no area"));
        }
        Ok(Self {
            points,
            polygon,
            bbox,
        })
    }

    /// Ring vertices, first point repeated at the end.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// The closed ring as a `geo` line string.
    pub fn ring(&self) -> &LineString<f64> {
        self.polygon.exterior()
    }

    /// Number of edges (equal to the number of distinct vertices).
    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Perimeter length.
    pub fn length(&self) -> f64 {
        self.ring().length::<Euclidean>()
    }

    /// Signed area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.polygon.signed_area()
    }

    /// Strict interior test: points on the ring are outside.
    pub fn contains(&self, p: &Point2D) -> bool {
        self.polygon.contains(&to_point(p))
    }

    /// Minimum distance from `p` to any edge of the ring.
    pub fn distance_to(&self, p: &Point2D) -> f64 {
        let query = to_point(p);
        match self.ring().closest_point(&query) {
            Closest::Intersection(_) => 0.0,
            Closest::SinglePoint(nearest) => p.distance_to(&Point2D::new(nearest.x(), nearest.y())),
            Closest::Indeterminate => f64::INFINITY,
        }
    }

    /// True when no two edges of the ring meet other than adjacent edges at
    /// their shared vertex.
    pub fn is_simple(&self) -> bool {
        let edges: Vec<_> = self.ring().lines().collect();
        let n = edges.len();

        for i in 0..n {
            // Adjacent edges may only share their common vertex; a collinear
            // overlap means the ring folds back onto itself.
            if matches!(
                line_intersection(edges[i], edges[(i + 1) % n]),
                Some(LineIntersection::Collinear { .. })
            ) {
                return false;
            }

            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if line_intersection(edges[i], edges[j]).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// True when any edge of `self` meets any edge of `other`.
    pub fn touches(&self, other: &BoundaryLoop) -> bool {
        self.ring().intersects(other.ring())
    }
}

/// An outer boundary with zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    outer: BoundaryLoop,
    holes: Vec<BoundaryLoop>,
    // Outer ring with the holes as interiors
    region: Polygon<f64>,
}

impl Envelope {
    /// Validates and assembles an envelope.
    pub fn new(outer: BoundaryLoop, holes: Vec<BoundaryLoop>) -> Result<Self, ShapeError> {
        if !outer.is_simple() {
            return Err(ShapeError::malformed_envelope("outer loop self-intersects"));
        }

        for (i, hole) in holes.iter().enumerate() {
            if !hole.is_simple() {
                return Err(ShapeError::malformed_envelope(format!(
                    "hole {} self-intersects",
                    i + 1
                )));
            }
            if hole.touches(&outer) || !outer.polygon.contains(&hole.polygon) {
                return Err(ShapeError::malformed_envelope(format!(
                    "hole {} is not contained in the outer loop",
                    i + 1
                )));
            }
        }

        for (i, a) in holes.iter().enumerate() {
            for (j, b) in holes.iter().enumerate().skip(i + 1) {
                if a.polygon.intersects(&b.polygon) {
                    return Err(ShapeError::malformed_envelope(format!(
                        "holes {} and {} overlap",
                        i + 1,
                        j + 1
                    )));
                }
            }
        }

        let region = Polygon::new(
            outer.ring().clone(),
            holes.iter().map(|hole| hole.ring().clone()).collect(),
        );
        Ok(Self {
            outer,
            holes,
            region,
        })
    }

    pub fn outer(&self) -> &BoundaryLoop {
        &self.outer
    }

    pub fn holes(&self) -> &[BoundaryLoop] {
        &self.holes
    }

    /// All loops, outer first, then holes in input order.
    pub fn loops(&self) -> impl Iterator<Item = &BoundaryLoop> + '_ {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }

    /// True iff `p` is strictly inside the outer loop and strictly outside every hole.
    pub fn contains(&self, p: &Point2D) -> bool {
        self.region.contains(&to_point(p))
    }

    /// Minimum distance from `p` to any loop, outer or hole.
    pub fn distance_to_boundary(&self, p: &Point2D) -> f64 {
        self.loops()
            .map(|ring| ring.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        self.outer.bounding_box()
    }
}

/// Builds an [`Envelope`] from an ordered list of cubic segments.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    points_per_curve: usize,
}

impl EnvelopeBuilder {
    /// `points_per_curve` is clamped to at least 2.
    pub fn new(points_per_curve: usize) -> Self {
        Self {
            points_per_curve: points_per_curve.max(2),
        }
    }

    pub fn points_per_curve(&self) -> usize {
        self.points_per_curve
    }

    /// Splits segments into loops wherever an end point does not meet the
    /// next start point.
    pub fn split_loops(segments: &[CurveSegment]) -> Vec<&[CurveSegment]> {
        let mut loops = Vec::new();
        let mut start = 0;
        for i in 1..segments.len() {
            if !segments[i - 1]
                .end()
                .approx_eq(&segments[i].start(), CONTINUITY_EPSILON)
            {
                loops.push(&segments[start..i]);
                start = i;
            }
        }
        if start < segments.len() {
            loops.push(&segments[start..]);
        }
        loops
    }

    /// Samples every segment and assembles the loops into an envelope.
    pub fn build(&self, segments: &[CurveSegment]) -> Result<Envelope, ShapeError> {
        if segments.is_empty() {
            return Err(ShapeError::malformed_input("shape has no curve segments"));
        }
        if let Some(i) = segments.iter().position(|s| !s.is_finite()) {
            return Err(ShapeError::malformed_input(format!(
                "segment {} has non-finite control points",
                i
            )));
        }

        let mut rings = Vec::new();
        for group in Self::split_loops(segments) {
            let samples: Vec<Point2D> = group
                .iter()
                .flat_map(|seg| CurveSampler::sample(seg, self.points_per_curve))
                .collect();
            rings.push(BoundaryLoop::new(samples)?);
        }

        let mut rings = rings.into_iter();
        let outer = rings
            .next()
            .ok_or_else(|| ShapeError::malformed_input("shape has no loops"))?;
        let holes: Vec<BoundaryLoop> = rings.collect();

        debug!(
            "Envelope: outer loop with {} vertices, {} hole(s)",
            outer.edge_count(),
            holes.len()
        );

        Envelope::new(outer, holes)
    }
}
