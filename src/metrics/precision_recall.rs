//! Precision and recall with the benchmark's vacuous-truth conventions.

/// Precision = TP / (TP + FP).
///
/// By convention `fp == 0` yields a perfect 1.0 — no false alarms have
/// been observed yet — rather than NaN when `tp` is also zero.
///
/// # Examples
///
/// ```
/// use det3d_eval::metrics::precision_recall::precision_from_counts;
///
/// assert_eq!(precision_from_counts(8, 2), 0.8);
/// assert_eq!(precision_from_counts(0, 0), 1.0);
/// ```
#[must_use]
pub fn precision_from_counts(tp: usize, fp: usize) -> f64 {
    if fp == 0 {
        return 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let precision = tp as f64 / (tp + fp) as f64;
    precision
}

/// Recall = TP / (TP + FN).
///
/// By convention `fn == 0` yields 1.0 — every ground truth seen so far
/// was found.
///
/// # Examples
///
/// ```
/// use det3d_eval::metrics::precision_recall::recall_from_counts;
///
/// assert_eq!(recall_from_counts(8, 2), 0.8);
/// assert_eq!(recall_from_counts(0, 0), 1.0);
/// ```
#[must_use]
pub fn recall_from_counts(tp: usize, fn_: usize) -> f64 {
    if fn_ == 0 {
        return 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let recall = tp as f64 / (tp + fn_) as f64;
    recall
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_typical() {
        assert!((precision_from_counts(80, 20) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_precision_no_false_alarms_is_one() {
        assert_eq!(precision_from_counts(0, 0), 1.0);
        assert_eq!(precision_from_counts(100, 0), 1.0);
    }

    #[test]
    fn test_precision_all_false_alarms_is_zero() {
        assert_eq!(precision_from_counts(0, 10), 0.0);
    }

    #[test]
    fn test_recall_typical() {
        assert!((recall_from_counts(8, 3) - 8.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_recall_no_misses_is_one() {
        assert_eq!(recall_from_counts(0, 0), 1.0);
        assert_eq!(recall_from_counts(50, 0), 1.0);
    }

    #[test]
    fn test_recall_all_missed_is_zero() {
        assert_eq!(recall_from_counts(0, 7), 0.0);
    }
}
