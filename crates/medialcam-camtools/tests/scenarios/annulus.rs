use crate::annulus_shape;
use medialcam_camtools::{MachiningPipeline, PipelineParameters};
use medialcam_core::Point2D;

#[test]
fn test_annulus_depth_is_half_the_wall() {
    let pipeline = MachiningPipeline::new(PipelineParameters {
        points_per_curve: 20,
        resolution: 0.2,
        ..PipelineParameters::default()
    })
    .unwrap();
    let toolpath = pipeline.process_shape(&annulus_shape(0.0, 0.0, 10.0, 4.0)).unwrap();
    assert_eq!(toolpath.envelope.holes().len(), 1);

    let centre = Point2D::new(0.0, 0.0);
    let mut depths: Vec<f64> = Vec::new();
    for point in toolpath.segments.iter().flat_map(|s| s.points.iter()) {
        let r = point.position.distance_to(&centre);
        // Nothing inside the hole or outside the outer loop
        assert!(r > 4.0 && r < 10.0);
        assert!(point.distance_to_boundary <= 3.05);
        depths.push(point.distance_to_boundary);
    }
    assert!(!depths.is_empty());

    depths.sort_by(f64::total_cmp);
    let median = depths[depths.len() / 2];
    assert!((median - 3.0).abs() < 0.1, "median depth {median}");
}

#[test]
fn test_annulus_centre_is_not_cut() {
    let pipeline = MachiningPipeline::new(PipelineParameters {
        resolution: 0.25,
        ..PipelineParameters::default()
    })
    .unwrap();
    let toolpath = pipeline.process_shape(&annulus_shape(2.0, 2.0, 8.0, 3.0)).unwrap();
    let centre = Point2D::new(2.0, 2.0);
    assert!(toolpath
        .segments
        .iter()
        .flat_map(|s| s.points.iter())
        .all(|p| p.position.distance_to(&centre) > 3.0));
}
