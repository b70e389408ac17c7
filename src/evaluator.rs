//! Benchmark orchestration: configuration, accumulation and metric queries.

use log::{debug, warn};
use nalgebra::DMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::matching::FrameMatcher;
use crate::metrics::ap::average_precision;
use crate::metrics::fbeta::{best_operating_point, f1_score, fbeta_score, OperatingPoint};
use crate::metrics::precision_recall::{precision_from_counts, recall_from_counts};
use crate::stats::{AggregateStats, FrameStats};
use crate::threshold::{ScaleMode, ThresholdLadder};
use crate::types::{ObjectClass, TargetList};

/// Score the per-class text report is sampled at.
const REPORT_SCORE: f64 = 0.8;

fn default_sample_count() -> usize {
    40
}

fn default_sample_scale() -> String {
    "log10".to_string()
}

/// Construction parameters for a [`DetectionBenchmark`].
///
/// Deserializable, so an evaluation script can read it straight from a
/// JSON/TOML config file; `sample_count`, `min_score` and `sample_scale`
/// fall back to the defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Classes to score; anything else is ignored during matching.
    pub classes: Vec<ObjectClass>,
    /// IoU acceptance threshold per class, parallel to `classes`. A single
    /// value is shared by every class.
    pub min_overlaps: Vec<f64>,
    /// Number of PR sample thresholds.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Lowest confidence score considered.
    #[serde(default)]
    pub min_score: f64,
    /// Threshold spacing: "linear", "log" or "logN".
    #[serde(default = "default_sample_scale")]
    pub sample_scale: String,
}

impl BenchmarkConfig {
    /// Config with one shared overlap threshold and default sampling
    /// (40 log10-spaced thresholds from score 0).
    pub fn new(classes: Vec<ObjectClass>, min_overlap: f64) -> Self {
        Self {
            classes,
            min_overlaps: vec![min_overlap],
            sample_count: default_sample_count(),
            min_score: 0.0,
            sample_scale: default_sample_scale(),
        }
    }
}

/// One frame's worth of benchmark input: both object lists plus the
/// externally computed IoU matrix (rows = ground truths, columns =
/// detections).
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub ground_truths: TargetList,
    pub detections: TargetList,
    pub iou: DMatrix<f64>,
}

/// Accumulating benchmark over a detection dataset.
///
/// Build one per evaluation run, feed every frame through
/// [`get_stats`]/[`add_stats`] (or the convenience drivers), then query
/// precision, recall, F-score and AP per class.
///
/// Scalar queries take an optional reporting score; `None` reads the
/// ladder midpoint. The `_curve` variants return the full per-level
/// arrays.
///
/// [`get_stats`]: DetectionBenchmark::get_stats
/// [`add_stats`]: DetectionBenchmark::add_stats
#[derive(Debug, Clone)]
pub struct DetectionBenchmark {
    classes: Vec<ObjectClass>,
    matcher: FrameMatcher,
    totals: AggregateStats,
}

impl DetectionBenchmark {
    /// Validate a configuration and build the benchmark.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the class set is empty, the
    /// overlap list is neither a single value nor one per class, the
    /// sample scale is unrecognized, or the ladder parameters are
    /// degenerate.
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        if config.classes.is_empty() {
            return Err(EvalError::NoClasses);
        }

        let min_overlaps = match config.min_overlaps.len() {
            1 => vec![config.min_overlaps[0]; config.classes.len()],
            n if n == config.classes.len() => config.min_overlaps.clone(),
            n => {
                return Err(EvalError::OverlapCountMismatch {
                    classes: config.classes.len(),
                    overlaps: n,
                })
            }
        };

        let scale: ScaleMode = config.sample_scale.parse()?;
        let ladder = ThresholdLadder::build(config.sample_count, config.min_score, scale)?;
        debug!(
            "benchmark over {} classes, {} PR samples ({:?})",
            config.classes.len(),
            ladder.len(),
            scale
        );

        let class_ids = config.classes.iter().map(|c| c.id).collect();
        let totals = AggregateStats::zeros(config.classes.len(), ladder.len());
        Ok(Self {
            classes: config.classes,
            matcher: FrameMatcher::new(class_ids, min_overlaps, ladder),
            totals,
        })
    }

    /// The registered classes, in registry order.
    pub fn classes(&self) -> &[ObjectClass] {
        &self.classes
    }

    /// The threshold ladder metrics are sampled on.
    pub fn ladder(&self) -> &ThresholdLadder {
        self.matcher.ladder()
    }

    /// Number of frames accumulated so far.
    pub fn frames_processed(&self) -> usize {
        self.totals.frames
    }

    /// Match one frame; stateless, does not touch the accumulator.
    ///
    /// See [`FrameMatcher::match_frame`] for the algorithm and its
    /// preconditions.
    pub fn get_stats(
        &self,
        ground_truths: &TargetList,
        detections: &TargetList,
        iou: &DMatrix<f64>,
    ) -> Result<FrameStats> {
        self.matcher.match_frame(ground_truths, detections, iou)
    }

    /// Fold one frame's statistics into the running totals.
    pub fn add_stats(&mut self, stats: &FrameStats) {
        self.totals.merge(stats);
    }

    /// Match and accumulate in one step.
    pub fn process_frame(
        &mut self,
        ground_truths: &TargetList,
        detections: &TargetList,
        iou: &DMatrix<f64>,
    ) -> Result<()> {
        let stats = self.get_stats(ground_truths, detections, iou)?;
        self.add_stats(&stats);
        Ok(())
    }

    /// Sequential driver over many frames.
    pub fn process_frames<'a, I>(&mut self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a FrameInput>,
    {
        for frame in frames {
            self.process_frame(&frame.ground_truths, &frame.detections, &frame.iou)?;
        }
        Ok(())
    }

    /// Parallel driver: frames are matched on the rayon pool and partial
    /// aggregates combined in a reduction tree.
    ///
    /// Totals are identical to the sequential driver's — merging is
    /// commutative and associative, so the reduction order cannot show
    /// through.
    pub fn process_frames_parallel(&mut self, frames: &[FrameInput]) -> Result<()> {
        let classes = self.classes.len();
        let levels = self.ladder().len();
        let matcher = &self.matcher;

        let partial = frames
            .par_iter()
            .map(|f| matcher.match_frame(&f.ground_truths, &f.detections, &f.iou))
            .try_fold(
                || AggregateStats::zeros(classes, levels),
                |mut acc, stats| {
                    acc.merge(&stats?);
                    Ok::<_, EvalError>(acc)
                },
            )
            .try_reduce(
                || AggregateStats::zeros(classes, levels),
                |mut a, b| {
                    a.combine(&b);
                    Ok(a)
                },
            )?;

        self.totals.combine(&partial);
        Ok(())
    }

    fn report_level(&self, score: Option<f64>) -> usize {
        self.ladder().reporting_index(score)
    }

    fn per_level_counts(
        &self,
        counts: &[Vec<usize>],
        score: Option<f64>,
    ) -> Vec<(u64, usize)> {
        let level = self.report_level(score);
        self.classes
            .iter()
            .zip(counts)
            .map(|(class, row)| (class.id, row[level]))
            .collect()
    }

    /// Total ground-truth boxes seen, per class.
    pub fn gt_count(&self) -> Vec<(u64, usize)> {
        self.classes
            .iter()
            .zip(&self.totals.gt_count)
            .map(|(class, &count)| (class.id, count))
            .collect()
    }

    /// Detections present per class at the reporting level
    /// (mid-ladder when `score` is `None`).
    pub fn dt_count(&self, score: Option<f64>) -> Vec<(u64, usize)> {
        self.per_level_counts(&self.totals.dt_count, score)
    }

    /// True-positive count per class at the reporting level.
    pub fn true_positives(&self, score: Option<f64>) -> Vec<(u64, usize)> {
        self.per_level_counts(&self.totals.true_positives, score)
    }

    /// False-positive count per class at the reporting level.
    pub fn false_positives(&self, score: Option<f64>) -> Vec<(u64, usize)> {
        self.per_level_counts(&self.totals.false_positives, score)
    }

    /// False-negative count per class at the reporting level.
    pub fn false_negatives(&self, score: Option<f64>) -> Vec<(u64, usize)> {
        self.per_level_counts(&self.totals.false_negatives, score)
    }

    /// Per-class precision across the whole ladder.
    pub fn precision_curve(&self) -> Vec<(u64, Vec<f64>)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(ci, class)| {
                let curve = (0..self.ladder().len())
                    .map(|level| {
                        precision_from_counts(
                            self.totals.true_positives[ci][level],
                            self.totals.false_positives[ci][level],
                        )
                    })
                    .collect();
                (class.id, curve)
            })
            .collect()
    }

    /// Per-class recall across the whole ladder.
    pub fn recall_curve(&self) -> Vec<(u64, Vec<f64>)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(ci, class)| {
                let curve = (0..self.ladder().len())
                    .map(|level| {
                        recall_from_counts(
                            self.totals.true_positives[ci][level],
                            self.totals.false_negatives[ci][level],
                        )
                    })
                    .collect();
                (class.id, curve)
            })
            .collect()
    }

    /// Per-class F-beta across the whole ladder.
    pub fn fscore_curve(&self, beta: f64) -> Vec<(u64, Vec<f64>)> {
        self.precision_curve()
            .into_iter()
            .zip(self.recall_curve())
            .map(|((id, p_row), (_, r_row))| {
                let curve = p_row
                    .iter()
                    .zip(&r_row)
                    .map(|(&p, &r)| fbeta_score(p, r, beta))
                    .collect();
                (id, curve)
            })
            .collect()
    }

    /// Per-class precision at one reporting score (mid-ladder when `None`).
    pub fn precision(&self, score: Option<f64>) -> Vec<(u64, f64)> {
        let level = self.report_level(score);
        self.classes
            .iter()
            .enumerate()
            .map(|(ci, class)| {
                (
                    class.id,
                    precision_from_counts(
                        self.totals.true_positives[ci][level],
                        self.totals.false_positives[ci][level],
                    ),
                )
            })
            .collect()
    }

    /// Per-class recall at one reporting score (mid-ladder when `None`).
    pub fn recall(&self, score: Option<f64>) -> Vec<(u64, f64)> {
        let level = self.report_level(score);
        self.classes
            .iter()
            .enumerate()
            .map(|(ci, class)| {
                (
                    class.id,
                    recall_from_counts(
                        self.totals.true_positives[ci][level],
                        self.totals.false_negatives[ci][level],
                    ),
                )
            })
            .collect()
    }

    /// Per-class F-beta at one reporting score (mid-ladder when `None`).
    pub fn fscore(&self, beta: f64, score: Option<f64>) -> Vec<(u64, f64)> {
        self.precision(score)
            .into_iter()
            .zip(self.recall(score))
            .map(|((id, p), (_, r))| (id, fbeta_score(p, r, beta)))
            .collect()
    }

    /// Per-class average precision over the whole ladder.
    pub fn average_precision(&self) -> Vec<(u64, f64)> {
        self.precision_curve()
            .into_iter()
            .zip(self.recall_curve())
            .map(|((id, p_row), (_, r_row))| (id, average_precision(&p_row, &r_row)))
            .collect()
    }

    /// The ladder threshold with the best F-beta, per class.
    pub fn best_operating_point(&self, beta: f64) -> Vec<(u64, OperatingPoint)> {
        let thresholds = self.ladder().as_slice();
        self.precision_curve()
            .into_iter()
            .zip(self.recall_curve())
            .filter_map(|((id, p_row), (_, r_row))| {
                let points: Vec<OperatingPoint> = thresholds
                    .iter()
                    .zip(p_row.iter().zip(&r_row))
                    .map(|(&threshold, (&p, &r))| OperatingPoint {
                        threshold,
                        precision: p,
                        recall: r,
                        fscore: fbeta_score(p, r, beta),
                    })
                    .collect();
                best_operating_point(&points).cloned().map(|pt| (id, pt))
            })
            .collect()
    }

    /// Render the per-class text report.
    ///
    /// Precision, recall and F1 are sampled at score 0.8; AP covers the
    /// whole ladder.
    pub fn summary(&self) -> String {
        if self.totals.frames == 0 {
            warn!("summary requested before any frames were accumulated");
        }

        let precision = self.precision(Some(REPORT_SCORE));
        let recall = self.recall(Some(REPORT_SCORE));
        let ap = self.average_precision();

        let mut lines = vec![String::new()];
        lines.push("========== Benchmark Summary ==========".to_string());
        for (idx, class) in self.classes.iter().enumerate() {
            let dt_max = self.totals.dt_count[idx].iter().copied().max().unwrap_or(0);
            let f1 = f1_score(precision[idx].1, recall[idx].1);

            lines.push(format!("Results for {}:", class.name));
            lines.push(format!(
                "\tTotal processed targets:\t{} gt boxes, {} dt boxes",
                self.totals.gt_count[idx], dt_max
            ));
            lines.push(format!(
                "\tPrecision (score > {REPORT_SCORE}):\t{:.3}",
                precision[idx].1
            ));
            lines.push(format!(
                "\tRecall (score > {REPORT_SCORE}):\t\t{:.3}",
                recall[idx].1
            ));
            lines.push(format!("\tF1 (score > {REPORT_SCORE}):\t\t{:.3}", f1));
            lines.push(format!("\tAP:\t\t\t{:.3}", ap[idx].1));
        }
        lines.push("========== Summary End ==========".to_string());

        lines.join("\n")
    }
}
