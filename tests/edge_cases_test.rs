//! Edge case and boundary condition tests.

use det3d_eval::{
    BenchmarkConfig, Box3D, DetectionBenchmark, ObjectClass, ObjectTag, Target3D, TargetList,
};
use nalgebra::DMatrix;

const CAR: u64 = 1;
const PEDESTRIAN: u64 = 2;

fn target(label: u64, score: f64) -> Target3D {
    Target3D::new(
        Box3D::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0.0),
        ObjectTag::new(vec![label], vec![score]).unwrap(),
    )
}

fn frame(targets: Vec<Target3D>) -> TargetList {
    let mut list = TargetList::new("frame");
    for t in targets {
        list.push(t);
    }
    list
}

fn benchmark(sample_count: usize, min_score: f64) -> DetectionBenchmark {
    let config = BenchmarkConfig {
        classes: vec![
            ObjectClass::new(CAR, "car"),
            ObjectClass::new(PEDESTRIAN, "pedestrian"),
        ],
        min_overlaps: vec![0.5],
        sample_count,
        min_score,
        sample_scale: "linear".to_string(),
    };
    DetectionBenchmark::new(config).unwrap()
}

/// When no IoU entry clears the threshold: no true positives anywhere,
/// every ground truth missed, every present detection a false alarm.
#[test]
fn test_zero_overlap_frame() {
    let mut bench = benchmark(4, 0.0);

    let gts = frame(vec![target(CAR, 1.0), target(CAR, 1.0)]);
    let dts = frame(vec![target(CAR, 0.9), target(CAR, 0.4)]);
    let iou = DMatrix::from_row_slice(2, 2, &[0.3, 0.1, 0.2, 0.45]);

    let stats = bench.get_stats(&gts, &dts, &iou).unwrap();
    let car = 0;
    for level in 0..4 {
        assert_eq!(stats.true_positives[car][level], 0);
        assert_eq!(stats.false_negatives[car][level], stats.gt_count[car]);
        assert_eq!(
            stats.false_positives[car][level],
            stats.dt_count[car][level]
        );
    }
    // the 0.4-score detection drops out above threshold 0.25
    assert_eq!(stats.dt_count[car], vec![2, 2, 1, 1]);

    bench.add_stats(&stats);
    assert_eq!(bench.recall(Some(0.5))[car].1, 0.0);
}

/// Every ground truth paired with one perfect, fully confident detection:
/// true positives everywhere, nothing missed, no false alarms.
#[test]
fn test_perfect_overlap_frame() {
    let mut bench = benchmark(4, 0.0);

    let gts = frame(vec![
        target(CAR, 1.0),
        target(CAR, 1.0),
        target(PEDESTRIAN, 1.0),
    ]);
    let dts = frame(vec![
        target(CAR, 1.0),
        target(CAR, 1.0),
        target(PEDESTRIAN, 1.0),
    ]);
    let iou = DMatrix::from_row_slice(
        3,
        3,
        &[
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ],
    );

    let stats = bench.get_stats(&gts, &dts, &iou).unwrap();
    for level in 0..4 {
        assert_eq!(stats.true_positives[0][level], 2);
        assert_eq!(stats.true_positives[1][level], 1);
        assert_eq!(stats.false_positives[0][level], 0);
        assert_eq!(stats.false_negatives[0][level], 0);
        assert_eq!(stats.false_positives[1][level], 0);
        assert_eq!(stats.false_negatives[1][level], 0);
    }

    bench.add_stats(&stats);
    assert_eq!(bench.precision(None)[0].1, 1.0);
    assert_eq!(bench.recall(None)[0].1, 1.0);
}

#[test]
fn test_no_detections_at_all() {
    let mut bench = benchmark(4, 0.0);

    let gts = frame(vec![target(CAR, 1.0)]);
    let dts = TargetList::new("frame");
    let iou = DMatrix::zeros(1, 0);

    bench.process_frame(&gts, &dts, &iou).unwrap();
    assert_eq!(bench.recall(Some(0.5))[0].1, 0.0);
    // no detections means no false alarms: precision stays at its
    // vacuous 1.0
    assert_eq!(bench.precision(Some(0.5))[0].1, 1.0);
}

#[test]
fn test_no_ground_truth_at_all() {
    let mut bench = benchmark(4, 0.0);

    let gts = TargetList::new("frame");
    let dts = frame(vec![target(CAR, 0.9)]);
    let iou = DMatrix::zeros(0, 1);

    bench.process_frame(&gts, &dts, &iou).unwrap();
    assert_eq!(bench.precision(Some(0.5))[0].1, 0.0);
    // nothing to miss: recall stays at its vacuous 1.0
    assert_eq!(bench.recall(Some(0.5))[0].1, 1.0);
}

#[test]
fn test_both_lists_empty() {
    let mut bench = benchmark(4, 0.0);
    bench
        .process_frame(
            &TargetList::new("frame"),
            &TargetList::new("frame"),
            &DMatrix::zeros(0, 0),
        )
        .unwrap();

    assert_eq!(bench.frames_processed(), 1);
    assert_eq!(bench.precision(None)[0].1, 1.0);
    assert_eq!(bench.recall(None)[0].1, 1.0);
    assert_eq!(bench.average_precision()[0].1, 0.0);
}

#[test]
fn test_only_unregistered_classes() {
    let mut bench = benchmark(4, 0.0);

    let gts = frame(vec![target(77, 1.0)]);
    let dts = frame(vec![target(77, 0.9)]);
    let iou = DMatrix::from_row_slice(1, 1, &[1.0]);

    bench.process_frame(&gts, &dts, &iou).unwrap();
    assert_eq!(bench.gt_count(), vec![(CAR, 0), (PEDESTRIAN, 0)]);
    assert_eq!(bench.true_positives(None), vec![(CAR, 0), (PEDESTRIAN, 0)]);
}

#[test]
fn test_score_exactly_at_min_score() {
    let mut bench = benchmark(4, 0.3);

    let gts = frame(vec![target(CAR, 1.0)]);
    let dts = frame(vec![target(CAR, 0.3)]);
    let iou = DMatrix::from_row_slice(1, 1, &[0.9]);

    // min_score itself is a valid score; it just never clears the first
    // threshold, so the detection is present at no level
    let stats = bench.get_stats(&gts, &dts, &iou).unwrap();
    assert_eq!(stats.dt_count[0], vec![0, 0, 0, 0]);
    assert_eq!(stats.true_positives[0], vec![0, 0, 0, 0]);
}

#[test]
fn test_single_level_ladder() {
    let config = BenchmarkConfig {
        classes: vec![ObjectClass::new(CAR, "car")],
        min_overlaps: vec![0.5],
        sample_count: 1,
        min_score: 0.0,
        sample_scale: "linear".to_string(),
    };
    let mut bench = DetectionBenchmark::new(config).unwrap();
    assert_eq!(bench.ladder().len(), 1);

    let gts = frame(vec![target(CAR, 1.0)]);
    let dts = frame(vec![target(CAR, 0.9)]);
    let iou = DMatrix::from_row_slice(1, 1, &[0.8]);
    bench.process_frame(&gts, &dts, &iou).unwrap();

    assert_eq!(bench.true_positives(None), vec![(CAR, 1)]);
    // a single sample point has no area under it
    assert_eq!(bench.average_precision()[0].1, 0.0);
}

/// An object carrying several candidate labels is matched only under its
/// top-ranked one.
#[test]
fn test_multi_label_tag_uses_top_label_only() {
    let mut bench = benchmark(4, 0.0);

    let gts = frame(vec![target(CAR, 1.0)]);
    let mut dts = TargetList::new("frame");
    dts.push(Target3D::new(
        Box3D::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0.0),
        ObjectTag::new(vec![PEDESTRIAN, CAR], vec![0.6, 0.9]).unwrap(),
    ));
    let iou = DMatrix::from_row_slice(1, 1, &[0.8]);

    let stats = bench.get_stats(&gts, &dts, &iou).unwrap();
    // top label is car (0.9 > 0.6): it matches the car ground truth and
    // contributes nothing to the pedestrian class
    assert_eq!(stats.true_positives[0], vec![1, 1, 1, 1]);
    assert_eq!(stats.dt_count[1], vec![0, 0, 0, 0]);
    assert_eq!(stats.false_positives[1], vec![0, 0, 0, 0]);
}

#[test]
fn test_unframed_lists_still_match() {
    let mut bench = benchmark(4, 0.0);

    let gts: TargetList = vec![target(CAR, 1.0)].into();
    let dts: TargetList = vec![target(CAR, 0.9)].into();
    assert!(gts.frame.is_none());

    let iou = DMatrix::from_row_slice(1, 1, &[0.8]);
    bench.process_frame(&gts, &dts, &iou).unwrap();
    assert_eq!(bench.true_positives(Some(0.5)), vec![(CAR, 1), (PEDESTRIAN, 0)]);
}

#[test]
fn test_log_ladder_end_to_end() {
    let config = BenchmarkConfig {
        classes: vec![ObjectClass::new(CAR, "car")],
        min_overlaps: vec![0.5],
        sample_count: 40,
        min_score: 0.0,
        sample_scale: "log10".to_string(),
    };
    let mut bench = DetectionBenchmark::new(config).unwrap();

    let gts = frame(vec![target(CAR, 1.0), target(CAR, 1.0)]);
    let dts = frame(vec![target(CAR, 0.97), target(CAR, 0.55)]);
    let iou = DMatrix::from_row_slice(2, 2, &[0.8, 0.0, 0.0, 0.7]);
    bench.process_frame(&gts, &dts, &iou).unwrap();

    // near the top of the ladder only the 0.97 detection survives
    let top = bench.ladder().as_slice()[39];
    assert!(top > 0.9);
    let recall_curve = &bench.recall_curve()[0].1;
    assert_eq!(recall_curve[0], 1.0);
    assert!(recall_curve[39] < 1.0);

    let ap = bench.average_precision()[0].1;
    assert!((0.0..=1.0).contains(&ap));
}
