//! Average precision by trapezoidal integration of the PR curve.

/// Integrate precision over recall across the threshold ladder.
///
/// Both slices are indexed by ladder level, ascending threshold. As the
/// threshold rises, recall shrinks while precision typically grows, so the
/// raw trapezoid sum comes out negative; the sign is flipped so AP is
/// reported as the non-negative area under the precision-recall curve.
///
/// # Examples
///
/// ```
/// use det3d_eval::metrics::ap::average_precision;
///
/// // precision 1.0 while recall falls from 1.0 to 0.0: full unit area
/// let ap = average_precision(&[1.0, 1.0], &[1.0, 0.0]);
/// assert!((ap - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn average_precision(precisions: &[f64], recalls: &[f64]) -> f64 {
    -trapezoid(precisions, recalls)
}

/// Composite trapezoidal rule: integral of y along x.
fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());

    let mut area = 0.0;
    for i in 1..x.len() {
        area += (x[i] - x[i - 1]) * (y[i] + y[i - 1]) / 2.0;
    }
    area
}
