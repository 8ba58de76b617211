use crate::circle_shape;
use medialcam_camtools::{MachiningPipeline, MotionRecord, PipelineParameters};
use medialcam_core::Point2D;

fn params() -> PipelineParameters {
    PipelineParameters {
        points_per_curve: 20,
        resolution: 0.2,
        ..PipelineParameters::default()
    }
}

#[test]
fn test_circle_deepest_cut_at_centre() {
    let pipeline = MachiningPipeline::new(params()).unwrap();
    let toolpath = pipeline.process_shape(&circle_shape(0.0, 0.0, 10.0)).unwrap();

    let deepest = toolpath
        .segments
        .iter()
        .flat_map(|s| s.points.iter())
        .max_by(|a, b| a.distance_to_boundary.total_cmp(&b.distance_to_boundary))
        .unwrap();
    assert!((deepest.distance_to_boundary - 10.0).abs() < 0.05);
    assert!(deepest.position.distance_to(&Point2D::new(0.0, 0.0)) < 0.5);
}

#[test]
fn test_circle_records_stay_inside() {
    let pipeline = MachiningPipeline::new(params()).unwrap();
    let toolpath = pipeline.process_shape(&circle_shape(5.0, -3.0, 10.0)).unwrap();
    let centre = Point2D::new(5.0, -3.0);

    for record in &toolpath.records {
        match *record {
            MotionRecord::Rapid { z, .. } => assert_eq!(z, 5.0),
            MotionRecord::Cut { x, y, z } => {
                assert!(z < 0.0 && z > -10.05);
                assert!(Point2D::new(x, y).distance_to(&centre) < 10.0);
                // Depth never exceeds the distance to the circle
                let to_circle = 10.0 - Point2D::new(x, y).distance_to(&centre);
                assert!(-z <= to_circle + 0.05);
            }
        }
    }
}

#[test]
fn test_every_medial_point_is_cut_once() {
    let pipeline = MachiningPipeline::new(params()).unwrap();
    let toolpath = pipeline.process_shape(&circle_shape(0.0, 0.0, 6.0)).unwrap();
    let cuts = toolpath.records.iter().filter(|r| !r.is_rapid()).count();
    let rapids = toolpath.records.len() - cuts;
    assert_eq!(cuts, toolpath.medial_point_count);
    assert_eq!(rapids, 2 * toolpath.segments.len());
}
