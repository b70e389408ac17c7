//! Error types for the det3d-eval library.

use thiserror::Error;

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error types that can occur while configuring or running a benchmark.
///
/// Construction-time variants (`UnknownScaleMode`, `OverlapCountMismatch`,
/// `NoClasses`, `InvalidLadder`) are fatal configuration errors. The
/// per-call variants (`FrameMismatch`, `ScoreOutOfRange`,
/// `IouShapeMismatch`) report precondition violations in caller-supplied
/// frame data; the caller decides whether to abort the run or drop the
/// offending frame.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Unrecognized PR sample scale string.
    #[error("unrecognized sample scale {0:?} (expected \"linear\", \"log\" or \"logN\")")]
    UnknownScaleMode(String),

    /// Overlap-threshold list does not line up with the class list.
    #[error("expected 1 or {classes} overlap thresholds for {classes} classes, got {overlaps}")]
    OverlapCountMismatch { classes: usize, overlaps: usize },

    /// The benchmark needs at least one registered class.
    #[error("no object classes registered")]
    NoClasses,

    /// Degenerate threshold-ladder parameters.
    #[error("invalid threshold ladder: {0}")]
    InvalidLadder(String),

    /// Ground truth and detections reference different frames.
    #[error("frame mismatch: ground truth in {gt:?}, detections in {dt:?}")]
    FrameMismatch {
        gt: Option<String>,
        dt: Option<String>,
    },

    /// A confidence score outside the configured [min_score, 1] range.
    #[error("score {score} outside [{min_score}, 1]")]
    ScoreOutOfRange { score: f64, min_score: f64 },

    /// Supplied IoU matrix does not match the frame's object counts.
    #[error("IoU matrix is {rows}x{cols}, expected {gts}x{dts} (ground truths x detections)")]
    IouShapeMismatch {
        rows: usize,
        cols: usize,
        gts: usize,
        dts: usize,
    },

    /// An object tag with mismatched label/score lists.
    #[error("tag needs one score per label, got {labels} labels and {scores} scores")]
    TagLengthMismatch { labels: usize, scores: usize },

    /// Error raised while assembling a DataFrame export.
    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
}
