//! Greedy nearest-neighbour ordering of medial points
//!
//! Starting from the left-most point, the orderer repeatedly walks to the
//! closest unvisited point. Once past a short warm-up, a hop that exceeds a
//! multiple of the running mean hop length starts a new segment: the tool
//! lifts, travels and plunges instead of dragging across the workpiece.
//!
//! Nearest-neighbour lookups go through an R*-tree. Ties are broken by the
//! lowest input index so the result matches a naive linear scan exactly.

use medialcam_core::MedialPoint;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::debug;

/// Accepted hops before the break rule applies.
pub const WARMUP_STEPS: usize = 10;

/// A hop of at least this many running means starts a new segment.
pub const BREAK_FACTOR: f64 = 5.0;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// A run of medial points cut without lifting the tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSegment {
    pub points: Vec<MedialPoint>,
}

impl PathSegment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&MedialPoint> {
        self.points.first()
    }
}

/// Orders medial points into cutting segments.
#[derive(Debug, Clone, Copy)]
pub struct PathOrderer {
    warmup_steps: usize,
    break_factor: f64,
}

impl Default for PathOrderer {
    fn default() -> Self {
        Self {
            warmup_steps: WARMUP_STEPS,
            break_factor: BREAK_FACTOR,
        }
    }
}

impl PathOrderer {
    pub fn warmup_steps(&self) -> usize {
        self.warmup_steps
    }

    pub fn break_factor(&self) -> f64 {
        self.break_factor
    }

    /// Orders `points` into segments. Every input point appears exactly once.
    pub fn order(&self, points: &[MedialPoint]) -> Vec<PathSegment> {
        let Some(start) = start_index(points) else {
            return Vec::new();
        };

        let entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != start)
            .map(|(i, p)| GeomWithData::new([p.x(), p.y()], i))
            .collect();
        let mut tree = RTree::bulk_load(entries);

        let mut segments = Vec::new();
        let mut current = vec![points[start]];
        let mut position = [points[start].x(), points[start].y()];
        let mut mean = 0.0;
        let mut steps: usize = 0;

        while let Some((entry, distance_2)) = nearest(&tree, &position) {
            tree.remove(&entry);
            let next = points[entry.data];
            let distance = distance_2.sqrt();

            if steps < self.warmup_steps || distance < self.break_factor * mean {
                mean = (mean * steps as f64 + distance) / (steps as f64 + 1.0);
                steps += 1;
                current.push(next);
            } else {
                segments.push(PathSegment {
                    points: std::mem::take(&mut current),
                });
                current.push(next);
                mean = 0.0;
                steps = 0;
            }
            position = *entry.geom();
        }
        segments.push(PathSegment { points: current });

        debug!(
            "Ordered {} medial points into {} segments",
            points.len(),
            segments.len()
        );
        segments
    }
}

/// Smallest x, then smallest y, then lowest index.
fn start_index(points: &[MedialPoint]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        best = match best {
            None => Some(i),
            Some(b) => {
                let q = &points[b];
                if p.x() < q.x() || (p.x() == q.x() && p.y() < q.y()) {
                    Some(i)
                } else {
                    Some(b)
                }
            }
        };
    }
    best
}

/// Nearest remaining entry to `position`, lowest index among equal distances.
fn nearest(tree: &RTree<IndexedPoint>, position: &[f64; 2]) -> Option<(IndexedPoint, f64)> {
    let mut candidates = tree.nearest_neighbor_iter_with_distance_2(position);
    let (first, best_distance_2) = candidates.next()?;
    let mut best = *first;
    for (candidate, distance_2) in candidates {
        if distance_2 > best_distance_2 {
            break;
        }
        if candidate.data < best.data {
            best = *candidate;
        }
    }
    Some((best, best_distance_2))
}
