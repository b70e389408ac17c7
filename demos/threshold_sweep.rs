//! Example demonstrating a confidence-threshold sweep and operating-point
//! selection.

use det3d_eval::{
    BenchmarkConfig, Box3D, DetectionBenchmark, FrameInput, ObjectClass, ObjectTag, Target3D,
    TargetList,
};
use nalgebra::DMatrix;

/// Synthesize a small dataset: detectors rarely miss nearby objects but
/// produce stray low-score boxes.
fn synthetic_frames() -> Vec<FrameInput> {
    (0..20)
        .map(|i| {
            let frame_id = format!("frame/{i:04}");
            let mut gts = TargetList::new(frame_id.clone());
            let mut dts = TargetList::new(frame_id);

            gts.push(Target3D::new(
                Box3D::new([10.0 + i as f64, 0.0, 0.0], [4.0, 1.9, 1.5], 0.0),
                ObjectTag::certain(1),
            ));
            gts.push(Target3D::new(
                Box3D::new([-5.0, 2.0 + i as f64, 0.0], [4.2, 1.9, 1.6], 0.2),
                ObjectTag::certain(1),
            ));

            // a strong hit, a weak hit, and a stray box every third frame
            let strong = 0.75 + 0.2 * ((i % 5) as f64 / 5.0);
            let weak = 0.25 + 0.3 * ((i % 4) as f64 / 4.0);
            dts.push(Target3D::new(
                Box3D::new([10.1 + i as f64, 0.1, 0.0], [4.0, 1.9, 1.5], 0.0),
                ObjectTag::scored(1, strong),
            ));
            dts.push(Target3D::new(
                Box3D::new([-5.2, 2.2 + i as f64, 0.0], [4.1, 1.8, 1.5], 0.2),
                ObjectTag::scored(1, weak),
            ));
            let mut iou_rows = vec![0.82, 0.03, 0.02, 0.66];
            if i % 3 == 0 {
                dts.push(Target3D::new(
                    Box3D::new([30.0, -8.0, 0.0], [3.9, 1.8, 1.4], 0.0),
                    ObjectTag::scored(1, 0.45),
                ));
                iou_rows = vec![0.82, 0.03, 0.01, 0.02, 0.66, 0.01];
            }

            let iou = DMatrix::from_row_slice(2, dts.len(), &iou_rows);
            FrameInput {
                ground_truths: gts,
                detections: dts,
                iou,
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Threshold Sweep ===\n");

    let config = BenchmarkConfig {
        classes: vec![ObjectClass::new(1, "car")],
        min_overlaps: vec![0.5],
        sample_count: 12,
        min_score: 0.0,
        sample_scale: "log10".to_string(),
    };
    let mut benchmark = DetectionBenchmark::new(config)?;

    let frames = synthetic_frames();
    benchmark.process_frames_parallel(&frames)?;
    println!(
        "Accumulated {} frames, {} ground-truth boxes\n",
        benchmark.frames_processed(),
        benchmark.gt_count()[0].1
    );

    println!("Threshold | Precision | Recall |  F1");
    println!("----------|-----------|--------|------");
    let thresholds = benchmark.ladder().as_slice().to_vec();
    let precision = benchmark.precision_curve().remove(0).1;
    let recall = benchmark.recall_curve().remove(0).1;
    let f1 = benchmark.fscore_curve(1.0).remove(0).1;
    for (level, threshold) in thresholds.iter().enumerate() {
        println!(
            "  {threshold:>7.3} | {:>9.4} | {:>6.4} | {:.4}",
            precision[level], recall[level], f1[level]
        );
    }
    println!();

    for beta in [0.5, 1.0, 2.0] {
        let best = benchmark.best_operating_point(beta);
        let (_, point) = &best[0];
        println!(
            "Best F{beta}: threshold {:.3} (precision {:.3}, recall {:.3}, F {:.3})",
            point.threshold, point.precision, point.recall, point.fscore
        );
    }
    println!();

    println!("{}", benchmark.summary());

    Ok(())
}
