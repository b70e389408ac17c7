//! Beta-weighted F-score and operating-point selection.

use serde::{Deserialize, Serialize};

/// Operating point of a detector on one class: a ladder threshold together
/// with the metrics observed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Confidence threshold the metrics were sampled at.
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
    pub fscore: f64,
}

/// F-beta score from precision and recall.
///
/// F-beta = (1 + beta²) · P · R / (beta² · P + R)
///
/// beta > 1 weights recall more heavily, beta < 1 precision. The return
/// value is the F-score itself — never the recall, however close the two
/// may look on symmetric inputs.
///
/// # Panics
///
/// Panics if beta is not positive.
///
/// # Examples
///
/// ```
/// use det3d_eval::metrics::fbeta::fbeta_score;
///
/// let f1 = fbeta_score(0.8, 0.9, 1.0);
/// assert!((f1 - 0.847).abs() < 0.001);
///
/// let f2 = fbeta_score(0.8, 0.9, 2.0);
/// assert!((f2 - 0.878).abs() < 0.001);
/// ```
#[must_use]
pub fn fbeta_score(precision: f64, recall: f64, beta: f64) -> f64 {
    assert!(beta > 0.0, "beta must be positive, got {beta}");

    let beta_squared = beta * beta;
    let denominator = beta_squared * precision + recall;
    if denominator == 0.0 {
        return 0.0;
    }

    let fbeta = (1.0 + beta_squared) * precision * recall / denominator;

    debug_assert!(
        (0.0..=1.0).contains(&fbeta),
        "F-beta must be between 0 and 1, got {fbeta} (precision={precision}, recall={recall}, beta={beta})"
    );

    fbeta
}

/// F1 score: the harmonic mean of precision and recall.
#[must_use]
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    fbeta_score(precision, recall, 1.0)
}

/// Pick the operating point with the highest F-score.
///
/// Returns `None` when `points` is empty.
#[must_use]
pub fn best_operating_point(points: &[OperatingPoint]) -> Option<&OperatingPoint> {
    points.iter().max_by(|a, b| {
        a.fscore
            .partial_cmp(&b.fscore)
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
