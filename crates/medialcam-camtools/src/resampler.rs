//! Uniform arc-length resampling of envelope loops
//!
//! The step spacing is the controlled quantity: a longer loop yields more
//! samples. The output only seeds the Voronoi diagram, so loop seams are not
//! recorded.

use crate::envelope::{BoundaryLoop, Envelope};
use geo::{Euclidean, Length, LineInterpolatePoint};
use medialcam_core::{Point2D, ShapeError};
use tracing::debug;

/// Upper bound on the samples of one shape's boundary.
pub const MAX_BOUNDARY_SAMPLES: usize = 4_000_000;

/// Boundary samples of all loops, outer first, then holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledBoundary {
    pub points: Vec<Point2D>,
}

impl SampledBoundary {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Re-samples envelope loops at a fixed arc-length step.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryResampler {
    resolution: f64,
}

impl BoundaryResampler {
    /// `resolution` must be positive and finite; this is checked when the
    /// pipeline parameters are validated.
    pub fn new(resolution: f64) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of samples `resample_loop` produces for a loop of length `total`.
    fn sample_count(&self, total: f64) -> f64 {
        if !(self.resolution > 0.0) || !(total > 0.0) {
            return 0.0;
        }
        (total / self.resolution).ceil()
    }

    /// Points at arc lengths `0, r, 2r, ...` strictly below the loop length.
    pub fn resample_loop(&self, ring: &BoundaryLoop) -> Vec<Point2D> {
        let line = ring.ring();
        let total = line.length::<Euclidean>();
        let count = self.sample_count(total).min(MAX_BOUNDARY_SAMPLES as f64) as usize;

        (0..count)
            .map(|k| k as f64 * self.resolution)
            .take_while(|&target| target < total)
            .filter_map(|target| line.line_interpolate_point(target / total))
            .map(|p| Point2D::new(p.x(), p.y()))
            .collect()
    }

    /// Resamples every loop of the envelope and concatenates the results.
    ///
    /// Fails before sampling when the step is so fine that the boundary
    /// would exceed [`MAX_BOUNDARY_SAMPLES`].
    pub fn resample(&self, envelope: &Envelope) -> Result<SampledBoundary, ShapeError> {
        let estimated: f64 = envelope
            .loops()
            .map(|ring| self.sample_count(ring.length()))
            .sum();
        if estimated > MAX_BOUNDARY_SAMPLES as f64 {
            return Err(ShapeError::TooManySamples {
                estimated: estimated.min(usize::MAX as f64) as usize,
                limit: MAX_BOUNDARY_SAMPLES,
            });
        }

        let points: Vec<Point2D> = envelope
            .loops()
            .flat_map(|ring| self.resample_loop(ring))
            .collect();
        debug!(
            "Resampled boundary at step {}: {} points",
            self.resolution,
            points.len()
        );
        Ok(SampledBoundary { points })
    }
}
