use crate::{circle_shape, square_shape};
use medialcam_camtools::{
    write_outputs, BatchListener, GcodeWriter, MachiningPipeline, NoOpBatchListener,
    OutputOptions, PipelineParameters, ShapeInput,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use medialcam_core::ShapeError;

#[test]
fn test_insufficient_samples_skips_only_that_shape() {
    let shapes: Vec<ShapeInput> = vec![
        Ok(circle_shape(0.0, 0.0, 5.0)),
        // Perimeter 2 at step 1 leaves two samples
        Ok(square_shape(20.0, 20.0, 0.5)),
        Ok(square_shape(40.0, 0.0, 8.0)),
    ];
    let pipeline = MachiningPipeline::new(PipelineParameters {
        resolution: 1.0,
        ..PipelineParameters::default()
    })
    .unwrap();
    let report = pipeline.run(&shapes, &NoOpBatchListener);

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(
        report.failures[0].error,
        ShapeError::InsufficientSamples {
            found: 2,
            required: 4
        }
    );
    assert!(report.summary().contains("1 failed"));
}

#[test]
fn test_identical_runs_are_bit_identical() {
    let shapes: Vec<ShapeInput> = vec![
        Ok(circle_shape(1.0, 2.0, 7.0)),
        Ok(square_shape(0.0, 0.0, 9.0)),
    ];
    let params = PipelineParameters {
        resolution: 0.3,
        ..PipelineParameters::default()
    };
    let writer = GcodeWriter::default();
    let first = MachiningPipeline::new(params.clone())
        .unwrap()
        .run(&shapes, &NoOpBatchListener);
    let second = MachiningPipeline::new(params)
        .unwrap()
        .run(&shapes, &NoOpBatchListener);

    assert_eq!(first.outputs.len(), 2);
    for (a, b) in first.outputs.iter().zip(&second.outputs) {
        assert_eq!(writer.format(&a.records), writer.format(&b.records));
    }
}

#[test]
fn test_outputs_written_per_shape() {
    let dir = tempfile::tempdir().unwrap();
    let shapes: Vec<ShapeInput> = vec![
        Ok(square_shape(0.0, 0.0, 6.0)),
        Ok(circle_shape(20.0, 0.0, 4.0)),
    ];
    let pipeline = MachiningPipeline::new(PipelineParameters {
        resolution: 0.5,
        parallel: true,
        ..PipelineParameters::default()
    })
    .unwrap();
    let report = pipeline.run(&shapes, &NoOpBatchListener);
    let options = OutputOptions {
        directory: dir.path().to_path_buf(),
        extension: "gecode".to_string(),
        write_preview: false,
        ..OutputOptions::default()
    };
    let written = write_outputs(&report, &options).unwrap();
    assert_eq!(written.len(), 2);

    for index in 0..2 {
        let text =
            std::fs::read_to_string(dir.path().join(format!("machining_positions_{index}.gecode")))
                .unwrap();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("G0 X"));
        assert!(first.ends_with(" Z5"));
    }
}

#[derive(Default)]
struct CountingListener {
    progress: AtomicUsize,
}

impl BatchListener for CountingListener {
    fn on_progress(&self, _done: usize, _total: usize) {
        self.progress.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_output_dir_error_aborts_before_any_shape() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = dir.path().join("occupied");
    std::fs::write(&occupied, "plain file").unwrap();
    let options = OutputOptions {
        directory: occupied.join("output"),
        ..OutputOptions::default()
    };
    let shapes: Vec<ShapeInput> = vec![
        Ok(circle_shape(0.0, 0.0, 5.0)),
        Ok(square_shape(20.0, 0.0, 8.0)),
    ];
    let listener = CountingListener::default();

    let result = MachiningPipeline::new(PipelineParameters::default())
        .unwrap()
        .run_and_write(&shapes, &options, &listener);

    assert!(result.is_err());
    assert_eq!(listener.progress.load(Ordering::SeqCst), 0);
    assert!(!occupied.join("output").exists());
}
