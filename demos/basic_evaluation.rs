//! Basic evaluation example demonstrating core functionality.

use det3d_eval::{
    polars_utils, BenchmarkConfig, Box3D, DetectionBenchmark, ObjectClass, ObjectTag, Target3D,
    TargetList,
};
use nalgebra::DMatrix;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== 3D Detection Benchmark Example ===\n");

    // 1. Configure the benchmark: two classes, shared IoU threshold 0.5,
    //    16 linearly spaced confidence thresholds.
    println!("1. Building the benchmark");
    let config = BenchmarkConfig {
        classes: vec![
            ObjectClass::new(1, "car"),
            ObjectClass::new(2, "pedestrian"),
        ],
        min_overlaps: vec![0.5],
        sample_count: 16,
        min_score: 0.0,
        sample_scale: "linear".to_string(),
    };
    let mut benchmark = DetectionBenchmark::new(config)?;
    println!(
        "   {} classes, {} threshold levels\n",
        benchmark.classes().len(),
        benchmark.ladder().len()
    );

    // 2. First frame: two cars and a pedestrian, with one confident hit,
    //    one hesitant hit and one miss.
    println!("2. Scoring frame lidar/0001");
    let mut gts = TargetList::new("lidar/0001");
    gts.push(Target3D::new(
        Box3D::new([12.0, 3.5, 0.0], [4.3, 1.9, 1.6], 0.05),
        ObjectTag::certain(1),
    ));
    gts.push(Target3D::new(
        Box3D::new([25.0, -2.0, 0.0], [4.1, 1.8, 1.5], -0.4),
        ObjectTag::certain(1),
    ));
    gts.push(Target3D::new(
        Box3D::new([8.0, 6.0, 0.0], [0.6, 0.6, 1.8], 0.0),
        ObjectTag::certain(2),
    ));

    let mut dts = TargetList::new("lidar/0001");
    dts.push(Target3D::new(
        Box3D::new([12.1, 3.4, 0.0], [4.2, 1.9, 1.6], 0.04),
        ObjectTag::scored(1, 0.94),
    ));
    dts.push(Target3D::new(
        Box3D::new([25.6, -2.3, 0.0], [4.0, 1.8, 1.5], -0.35),
        ObjectTag::scored(1, 0.41),
    ));

    // IoU between every (ground truth, detection) pair, from an external
    // geometry routine
    let iou = DMatrix::from_row_slice(
        3,
        2,
        &[
            0.88, 0.02, //
            0.01, 0.63, //
            0.00, 0.00,
        ],
    );
    benchmark.process_frame(&gts, &dts, &iou)?;

    // 3. Second frame: a false alarm on an empty road.
    println!("3. Scoring frame lidar/0002");
    let gts = TargetList::new("lidar/0002");
    let mut dts = TargetList::new("lidar/0002");
    dts.push(Target3D::new(
        Box3D::new([40.0, 0.0, 0.0], [4.0, 1.8, 1.5], 0.0),
        ObjectTag::scored(1, 0.55),
    ));
    benchmark.process_frame(&gts, &dts, &DMatrix::zeros(0, 1))?;

    println!("   {} frames accumulated\n", benchmark.frames_processed());

    // 4. Counts at an explicit reporting score.
    println!("4. Counts at score 0.5");
    for ((id, tp), ((_, fp), (_, fn_))) in benchmark
        .true_positives(Some(0.5))
        .into_iter()
        .zip(
            benchmark
                .false_positives(Some(0.5))
                .into_iter()
                .zip(benchmark.false_negatives(Some(0.5))),
        )
    {
        println!("   class {id}: tp={tp} fp={fp} fn={fn_}");
    }
    println!();

    // 5. The standard text report.
    println!("5. Summary report");
    println!("{}\n", benchmark.summary());

    // 6. DataFrame export for notebooks/plotting.
    println!("6. PR curve as a DataFrame");
    let curve = polars_utils::pr_curve_frame(&benchmark)?;
    println!("{curve}");

    println!("=== Example Complete ===");

    Ok(())
}
