//! Error handling and validation tests.

use det3d_eval::{
    BenchmarkConfig, Box3D, DetectionBenchmark, EvalError, ObjectClass, ObjectTag, ScaleMode,
    Target3D, TargetList, ThresholdLadder,
};
use nalgebra::DMatrix;

fn car_classes() -> Vec<ObjectClass> {
    vec![ObjectClass::new(1, "car")]
}

fn config_with_scale(scale: &str) -> BenchmarkConfig {
    BenchmarkConfig {
        classes: car_classes(),
        min_overlaps: vec![0.5],
        sample_count: 10,
        min_score: 0.0,
        sample_scale: scale.to_string(),
    }
}

fn target(label: u64, score: f64) -> Target3D {
    Target3D::new(
        Box3D::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], 0.0),
        ObjectTag::new(vec![label], vec![score]).unwrap(),
    )
}

#[test]
fn test_unknown_scale_mode_is_construction_error() {
    for scale in ["lin ear", "exp", "log-10", "LOG", ""] {
        let err = DetectionBenchmark::new(config_with_scale(scale)).unwrap_err();
        match err {
            EvalError::UnknownScaleMode(s) => assert_eq!(s, scale),
            other => panic!("expected UnknownScaleMode, got {other:?}"),
        }
    }
}

#[test]
fn test_log_base_below_two_is_rejected() {
    assert!(DetectionBenchmark::new(config_with_scale("log1")).is_err());
    assert!(DetectionBenchmark::new(config_with_scale("log0")).is_err());
    // direct ladder construction rejects it too
    assert!(ThresholdLadder::build(10, 0.0, ScaleMode::Log(1)).is_err());
}

#[test]
fn test_overlap_list_length_must_match_classes() {
    let config = BenchmarkConfig {
        classes: vec![ObjectClass::new(1, "car"), ObjectClass::new(2, "pedestrian")],
        min_overlaps: vec![0.5, 0.6, 0.7],
        sample_count: 10,
        min_score: 0.0,
        sample_scale: "linear".to_string(),
    };
    let err = DetectionBenchmark::new(config).unwrap_err();
    match err {
        EvalError::OverlapCountMismatch { classes, overlaps } => {
            assert_eq!(classes, 2);
            assert_eq!(overlaps, 3);
        }
        other => panic!("expected OverlapCountMismatch, got {other:?}"),
    }
}

#[test]
fn test_empty_class_set_is_rejected() {
    let config = BenchmarkConfig::new(vec![], 0.5);
    assert!(matches!(
        DetectionBenchmark::new(config),
        Err(EvalError::NoClasses)
    ));
}

#[test]
fn test_degenerate_ladder_parameters_are_rejected() {
    let mut config = config_with_scale("linear");
    config.sample_count = 0;
    assert!(matches!(
        DetectionBenchmark::new(config),
        Err(EvalError::InvalidLadder(_))
    ));

    let mut config = config_with_scale("linear");
    config.min_score = 1.0;
    assert!(DetectionBenchmark::new(config).is_err());

    let mut config = config_with_scale("linear");
    config.min_score = -0.25;
    assert!(DetectionBenchmark::new(config).is_err());
}

#[test]
fn test_frame_mismatch_is_reported() {
    let bench = DetectionBenchmark::new(config_with_scale("linear")).unwrap();

    let gts = TargetList::new("lidar/0001");
    let dts = TargetList::new("lidar/0002");
    let err = bench.get_stats(&gts, &dts, &DMatrix::zeros(0, 0)).unwrap_err();
    match err {
        EvalError::FrameMismatch { gt, dt } => {
            assert_eq!(gt.as_deref(), Some("lidar/0001"));
            assert_eq!(dt.as_deref(), Some("lidar/0002"));
        }
        other => panic!("expected FrameMismatch, got {other:?}"),
    }

    // a framed list never matches an unframed one
    let unframed = TargetList::default();
    assert!(bench
        .get_stats(&gts, &unframed, &DMatrix::zeros(0, 0))
        .is_err());
}

#[test]
fn test_iou_shape_mismatch_is_reported() {
    let bench = DetectionBenchmark::new(config_with_scale("linear")).unwrap();

    let mut gts = TargetList::new("f");
    gts.push(target(1, 1.0));
    let mut dts = TargetList::new("f");
    dts.push(target(1, 0.9));
    dts.push(target(1, 0.8));

    let err = bench
        .get_stats(&gts, &dts, &DMatrix::zeros(1, 1))
        .unwrap_err();
    match err {
        EvalError::IouShapeMismatch { rows, cols, gts, dts } => {
            assert_eq!((rows, cols), (1, 1));
            assert_eq!((gts, dts), (1, 2));
        }
        other => panic!("expected IouShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_scores_outside_configured_range_are_fatal() {
    let mut config = config_with_scale("linear");
    config.min_score = 0.2;
    let bench = DetectionBenchmark::new(config).unwrap();

    let mut gts = TargetList::new("f");
    gts.push(target(1, 1.0));

    // detection below min_score
    let mut dts = TargetList::new("f");
    dts.push(target(1, 0.1));
    let err = bench
        .get_stats(&gts, &dts, &DMatrix::from_row_slice(1, 1, &[0.9]))
        .unwrap_err();
    assert!(matches!(err, EvalError::ScoreOutOfRange { score, .. } if score == 0.1));

    // detection above 1.0
    let mut dts = TargetList::new("f");
    dts.push(target(1, 1.5));
    assert!(bench
        .get_stats(&gts, &dts, &DMatrix::from_row_slice(1, 1, &[0.9]))
        .is_err());

    // ground-truth side is validated as well
    let mut low_gt = TargetList::new("f");
    low_gt.push(target(1, 0.05));
    let mut dts = TargetList::new("f");
    dts.push(target(1, 0.9));
    assert!(bench
        .get_stats(&low_gt, &dts, &DMatrix::from_row_slice(1, 1, &[0.9]))
        .is_err());
}

#[test]
fn test_tag_construction_errors() {
    let err = ObjectTag::new(vec![1, 2, 3], vec![0.5]).unwrap_err();
    match err {
        EvalError::TagLengthMismatch { labels, scores } => {
            assert_eq!(labels, 3);
            assert_eq!(scores, 1);
        }
        other => panic!("expected TagLengthMismatch, got {other:?}"),
    }
}

#[test]
fn test_error_messages_carry_context() {
    let err = DetectionBenchmark::new(config_with_scale("exp")).unwrap_err();
    assert!(err.to_string().contains("exp"));

    let err = EvalError::ScoreOutOfRange {
        score: 1.25,
        min_score: 0.0,
    };
    assert!(err.to_string().contains("1.25"));

    let err = EvalError::FrameMismatch {
        gt: Some("a".to_string()),
        dt: Some("b".to_string()),
    };
    let text = err.to_string();
    assert!(text.contains("\"a\"") && text.contains("\"b\""));
}

#[test]
fn test_config_json_with_bad_scale_fails_at_construction() {
    let json = r#"{
        "classes": [{"id": 1, "name": "car"}],
        "min_overlaps": [0.5],
        "sample_scale": "geometric"
    }"#;
    let config: BenchmarkConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(
        DetectionBenchmark::new(config),
        Err(EvalError::UnknownScaleMode(_))
    ));
}
