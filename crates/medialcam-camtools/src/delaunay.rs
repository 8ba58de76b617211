//! Delaunay triangulation and Voronoi vertices
//!
//! Incremental Bowyer–Watson triangulation inside a large super-triangle.
//! The finite Voronoi vertices of a point set are the circumcentres of its
//! Delaunay triangles, which is all the medial-axis extraction needs.
//!
//! Iteration order is fully determined by the input order (no hash-map
//! iteration), so identical input always yields identical output.

use crate::predicates::{circumcenter, in_circumcircle};
use medialcam_core::{BoundingBox, Point2D};
use std::collections::HashSet;

/// Super-triangle size relative to the input extent.
const SUPER_TRIANGLE_SCALE: f64 = 100.0;

/// Coincident circumcentres closer than this fraction of the extent are merged.
const MERGE_TOLERANCE: f64 = 1e-9;

/// A triangulated point set. Triangles are counter-clockwise index triples.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    pub points: Vec<Point2D>,
    pub triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Triangulates `input`. Exact duplicate points are ignored.
    pub fn new(input: &[Point2D]) -> Self {
        let points = dedup_exact(input);
        if points.len() < 3 {
            return Self {
                points,
                triangles: Vec::new(),
            };
        }
        let triangles = bowyer_watson(&points);
        Self { points, triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Circumcentres of all non-degenerate triangles, coincident ones merged.
    pub fn voronoi_vertices(&self) -> Vec<Point2D> {
        let Some(bbox) = BoundingBox::from_points(&self.points) else {
            return Vec::new();
        };
        let extent = bbox.width().max(bbox.height());
        let tol = if extent > 0.0 {
            extent * MERGE_TOLERANCE
        } else {
            MERGE_TOLERANCE
        };

        let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(self.triangles.len());
        let mut vertices = Vec::with_capacity(self.triangles.len());
        for &[a, b, c] in &self.triangles {
            let Some(center) = circumcenter(&self.points[a], &self.points[b], &self.points[c])
            else {
                continue;
            };
            let key = ((center.x / tol).round() as i64, (center.y / tol).round() as i64);
            if seen.insert(key) {
                vertices.push(center);
            }
        }
        vertices
    }
}

fn dedup_exact(input: &[Point2D]) -> Vec<Point2D> {
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(input.len());
    input
        .iter()
        .filter(|p| seen.insert((p.x.to_bits(), p.y.to_bits())))
        .copied()
        .collect()
}

fn bowyer_watson(points: &[Point2D]) -> Vec<[usize; 3]> {
    let n = points.len();
    let Some(bbox) = BoundingBox::from_points(points) else {
        return Vec::new();
    };
    let center = bbox.center();
    let size = bbox.width().max(bbox.height()).max(1.0) * SUPER_TRIANGLE_SCALE;

    let mut verts: Vec<Point2D> = points.to_vec();
    verts.push(Point2D::new(center.x - size, center.y - size));
    verts.push(Point2D::new(center.x + size, center.y - size));
    verts.push(Point2D::new(center.x, center.y + size));

    let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

    for i in 0..n {
        let p = verts[i];
        let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
            .into_iter()
            .partition(|&[a, b, c]| in_circumcircle(&verts[a], &verts[b], &verts[c], &p));

        triangles = good;
        if bad.is_empty() {
            continue;
        }

        let bad_edges: HashSet<(usize, usize)> = bad
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect();

        for &[a, b, c] in &bad {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                if !bad_edges.contains(&(v, u)) {
                    triangles.push([u, v, i]);
                }
            }
        }
    }

    triangles.retain(|t| t.iter().all(|&v| v < n));
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{orient2d, Orientation};
    use std::collections::HashMap;

    fn edge_usage(triangles: &[[usize; 3]]) -> HashMap<(usize, usize), usize> {
        let mut usage = HashMap::new();
        for &[a, b, c] in triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *usage.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        usage
    }

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_square_two_triangles() {
        let tri = Triangulation::new(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        assert_eq!(tri.triangles.len(), 2);
        // Both triangles share the square's circumcentre
        let v = tri.voronoi_vertices();
        assert_eq!(v.len(), 1);
        assert!(v[0].approx_eq(&p(0.5, 0.5), 1e-12));
    }

    #[test]
    fn test_triangles_are_ccw_and_delaunay() {
        let pts: Vec<Point2D> = (0..30)
            .map(|i| {
                let t = i as f64;
                p((t * 7.3) % 11.0, (t * 3.7) % 9.0 + (t * 0.01))
            })
            .collect();
        let tri = Triangulation::new(&pts);
        assert!(!tri.is_empty());

        for &[a, b, c] in &tri.triangles {
            let (pa, pb, pc) = (&tri.points[a], &tri.points[b], &tri.points[c]);
            assert_eq!(orient2d(pa, pb, pc), Orientation::CounterClockwise);
            for (i, q) in tri.points.iter().enumerate() {
                if i == a || i == b || i == c {
                    continue;
                }
                assert!(!in_circumcircle(pa, pb, pc, q));
            }
        }

        for count in edge_usage(&tri.triangles).values() {
            assert!(*count == 1 || *count == 2);
        }
    }

    #[test]
    fn test_duplicates_ignored() {
        let tri = Triangulation::new(&[
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(0.0, 0.0),
            p(0.0, 3.0),
            p(4.0, 0.0),
        ]);
        assert_eq!(tri.points.len(), 3);
        assert_eq!(tri.triangles.len(), 1);
        let v = tri.voronoi_vertices();
        assert_eq!(v.len(), 1);
        assert!(v[0].approx_eq(&p(2.0, 1.5), 1e-12));
    }

    #[test]
    fn test_collinear_points_have_no_triangles() {
        let pts: Vec<Point2D> = (0..10).map(|i| p(i as f64, 2.0 * i as f64)).collect();
        let tri = Triangulation::new(&pts);
        assert!(tri.is_empty());
        assert!(tri.voronoi_vertices().is_empty());
    }

    #[test]
    fn test_deterministic() {
        let pts: Vec<Point2D> = (0..40)
            .map(|i| {
                let a = i as f64 * 0.37;
                p(a.cos() * (3.0 + (i % 3) as f64), a.sin() * 2.0)
            })
            .collect();
        let first = Triangulation::new(&pts);
        let second = Triangulation::new(&pts);
        assert_eq!(first.triangles, second.triangles);
        assert_eq!(first.voronoi_vertices(), second.voronoi_vertices());
    }
}
