//! Medial-axis approximation
//!
//! Voronoi vertices of dense boundary samples approximate the medial axis.
//! Only vertices strictly inside the envelope are kept; each carries its
//! distance to the nearest loop, which later becomes the cutting depth.

use crate::delaunay::Triangulation;
use crate::envelope::Envelope;
use crate::resampler::SampledBoundary;
use medialcam_core::{MedialPoint, ShapeError};
use tracing::debug;

/// Minimum number of boundary samples for a Voronoi diagram.
pub const MIN_BOUNDARY_SAMPLES: usize = 4;

/// Extracts interior Voronoi vertices with their boundary distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedialAxisExtractor;

impl MedialAxisExtractor {
    pub fn extract(
        boundary: &SampledBoundary,
        envelope: &Envelope,
    ) -> Result<Vec<MedialPoint>, ShapeError> {
        if boundary.len() < MIN_BOUNDARY_SAMPLES {
            return Err(ShapeError::InsufficientSamples {
                found: boundary.len(),
                required: MIN_BOUNDARY_SAMPLES,
            });
        }

        let triangulation = Triangulation::new(&boundary.points);
        let vertices = triangulation.voronoi_vertices();

        let medial: Vec<MedialPoint> = vertices
            .into_iter()
            .filter(|v| envelope.contains(v))
            .map(|v| MedialPoint::new(v, envelope.distance_to_boundary(&v)))
            .collect();

        debug!(
            "Medial axis: {} triangles, {} interior vertices",
            triangulation.triangles.len(),
            medial.len()
        );

        Ok(medial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeBuilder;
    use crate::resampler::BoundaryResampler;
    use medialcam_core::{CurveSegment, Point2D};

    fn rectangle(w: f64, h: f64) -> Vec<CurveSegment> {
        let c = [
            Point2D::new(0.0, 0.0),
            Point2D::new(w, 0.0),
            Point2D::new(w, h),
            Point2D::new(0.0, h),
        ];
        (0..4)
            .map(|i| CurveSegment::line(c[i], c[(i + 1) % 4]))
            .collect()
    }

    #[test]
    fn test_insufficient_samples() {
        let env = EnvelopeBuilder::new(2).build(&rectangle(1.0, 1.0)).unwrap();
        let boundary = BoundaryResampler::new(1.5).resample(&env).unwrap();
        assert_eq!(boundary.len(), 3);
        let err = MedialAxisExtractor::extract(&boundary, &env).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InsufficientSamples {
                found: 3,
                required: 4
            }
        );
    }

    #[test]
    fn test_rectangle_medial_points_inside() {
        let env = EnvelopeBuilder::new(2).build(&rectangle(20.0, 6.0)).unwrap();
        let boundary = BoundaryResampler::new(0.5).resample(&env).unwrap();
        let medial = MedialAxisExtractor::extract(&boundary, &env).unwrap();
        assert!(!medial.is_empty());
        for m in &medial {
            assert!(env.contains(&m.position));
            assert!(m.distance_to_boundary > 0.0);
            assert!(m.distance_to_boundary <= 3.0 + 1e-9);
        }
        // The central spine of a 20x6 rectangle lies at depth 3
        assert!(medial
            .iter()
            .any(|m| (m.y() - 3.0).abs() < 0.1 && (m.distance_to_boundary - 3.0).abs() < 0.1));
    }
}
