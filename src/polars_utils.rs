//! DataFrame exports of benchmark results.
//!
//! Long-format frames suitable for plotting PR curves or joining with
//! other evaluation runs in a notebook.

use polars::prelude::*;

use crate::error::Result;
use crate::evaluator::DetectionBenchmark;
use crate::metrics::fbeta::f1_score;

/// PR curve in long format: one row per (class, ladder level).
///
/// Columns: `class`, `threshold`, `precision`, `recall`, `f1`.
pub fn pr_curve_frame(benchmark: &DetectionBenchmark) -> Result<DataFrame> {
    let thresholds = benchmark.ladder().as_slice();
    let precision = benchmark.precision_curve();
    let recall = benchmark.recall_curve();

    let rows = benchmark.classes().len() * thresholds.len();
    let mut class_col: Vec<String> = Vec::with_capacity(rows);
    let mut threshold_col: Vec<f64> = Vec::with_capacity(rows);
    let mut precision_col: Vec<f64> = Vec::with_capacity(rows);
    let mut recall_col: Vec<f64> = Vec::with_capacity(rows);
    let mut f1_col: Vec<f64> = Vec::with_capacity(rows);

    for (class, ((_, p_row), (_, r_row))) in benchmark
        .classes()
        .iter()
        .zip(precision.iter().zip(recall.iter()))
    {
        for (level, &threshold) in thresholds.iter().enumerate() {
            class_col.push(class.name.clone());
            threshold_col.push(threshold);
            precision_col.push(p_row[level]);
            recall_col.push(r_row[level]);
            f1_col.push(f1_score(p_row[level], r_row[level]));
        }
    }

    let df = df! {
        "class" => class_col,
        "threshold" => threshold_col,
        "precision" => precision_col,
        "recall" => recall_col,
        "f1" => f1_col,
    }?;

    Ok(df)
}

/// One row per class at a reporting score (mid-ladder when `None`).
///
/// Columns: `class`, `gt_count`, `dt_count`, `precision`, `recall`, `f1`,
/// `ap`.
pub fn summary_frame(benchmark: &DetectionBenchmark, score: Option<f64>) -> Result<DataFrame> {
    let gt_count = benchmark.gt_count();
    let dt_count = benchmark.dt_count(score);
    let precision = benchmark.precision(score);
    let recall = benchmark.recall(score);
    let ap = benchmark.average_precision();

    let classes = benchmark.classes();
    let class_col: Vec<String> = classes.iter().map(|c| c.name.clone()).collect();
    let gt_col: Vec<u64> = gt_count.iter().map(|&(_, n)| n as u64).collect();
    let dt_col: Vec<u64> = dt_count.iter().map(|&(_, n)| n as u64).collect();
    let precision_col: Vec<f64> = precision.iter().map(|&(_, v)| v).collect();
    let recall_col: Vec<f64> = recall.iter().map(|&(_, v)| v).collect();
    let f1_col: Vec<f64> = precision
        .iter()
        .zip(&recall)
        .map(|(&(_, p), &(_, r))| f1_score(p, r))
        .collect();
    let ap_col: Vec<f64> = ap.iter().map(|&(_, v)| v).collect();

    let df = df! {
        "class" => class_col,
        "gt_count" => gt_col,
        "dt_count" => dt_col,
        "precision" => precision_col,
        "recall" => recall_col,
        "f1" => f1_col,
        "ap" => ap_col,
    }?;

    Ok(df)
}
