//! # det3d-eval
//!
//! A Rust library for benchmarking 3D object detectors against ground
//! truth, sweeping every metric over a ladder of confidence thresholds.
//!
//! The library implements the standard offline detection metrics:
//! - **Precision** and **Recall** per class, at any threshold on the ladder
//! - **F-score** (beta-weighted) per class
//! - **AP** (Average Precision): area under the precision-recall curve
//!
//! ## Features
//!
//! - Greedy score-ordered matching of detections to ground truth, swept
//!   across all confidence thresholds in a single pass per frame
//! - Linear or log-concentrated threshold ladders
//! - Order-independent accumulation across frames, with an optional
//!   rayon-parallel driver
//! - The IoU matrix is supplied by the caller, so any overlap definition
//!   (BEV, 3D, distance-based) plugs in unchanged
//! - Polars DataFrame exports of PR curves and per-class summaries
//!
//! ## Quick Start
//!
//! ```rust
//! use det3d_eval::{
//!     BenchmarkConfig, Box3D, DetectionBenchmark, ObjectClass, ObjectTag, Target3D, TargetList,
//! };
//! use nalgebra::DMatrix;
//!
//! # fn main() -> det3d_eval::Result<()> {
//! let config = BenchmarkConfig::new(vec![ObjectClass::new(1, "car")], 0.5);
//! let mut benchmark = DetectionBenchmark::new(config)?;
//!
//! // one frame: a single ground-truth car and a confident detection
//! let mut gts = TargetList::new("lidar/0001");
//! gts.push(Target3D::new(
//!     Box3D::new([10.0, 2.0, 0.0], [4.2, 1.9, 1.6], 0.1),
//!     ObjectTag::certain(1),
//! ));
//! let mut dts = TargetList::new("lidar/0001");
//! dts.push(Target3D::new(
//!     Box3D::new([10.1, 2.1, 0.0], [4.0, 1.8, 1.5], 0.1),
//!     ObjectTag::scored(1, 0.92),
//! ));
//!
//! // IoU comes from an external geometry routine
//! let iou = DMatrix::from_row_slice(1, 1, &[0.83]);
//! benchmark.process_frame(&gts, &dts, &iou)?;
//!
//! println!("{}", benchmark.summary());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod evaluator;
pub mod matching;
pub mod metrics;
pub mod polars_utils;
pub mod stats;
pub mod threshold;
pub mod types;

// Re-export commonly used types and functions
pub use error::{EvalError, Result};
pub use evaluator::{BenchmarkConfig, DetectionBenchmark, FrameInput};
pub use matching::FrameMatcher;
pub use stats::{AggregateStats, FrameStats};
pub use threshold::{ScaleMode, ThresholdLadder};
pub use types::{Box3D, ObjectClass, ObjectTag, Target3D, TargetList};
