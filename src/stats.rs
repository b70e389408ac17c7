//! Per-frame and aggregated matching statistics.

use serde::{Deserialize, Serialize};

/// Matching counts for a single frame.
///
/// Shape: one row per registered class (registry order), one column per
/// ladder level. Ground-truth counts are per class only; how many
/// detections exist depends on the threshold, so detection counts carry
/// the full per-level shape.
///
/// Produced by the matcher, folded into [`AggregateStats`], then
/// discarded. Serializable so worker processes can ship their frame stats
/// back to an aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub true_positives: Vec<Vec<usize>>,
    pub false_positives: Vec<Vec<usize>>,
    pub false_negatives: Vec<Vec<usize>>,
    pub gt_count: Vec<usize>,
    pub dt_count: Vec<Vec<usize>>,
}

impl FrameStats {
    /// All-zero statistics for `classes` classes and `levels` ladder levels.
    pub fn zeros(classes: usize, levels: usize) -> Self {
        Self {
            true_positives: vec![vec![0; levels]; classes],
            false_positives: vec![vec![0; levels]; classes],
            false_negatives: vec![vec![0; levels]; classes],
            gt_count: vec![0; classes],
            dt_count: vec![vec![0; levels]; classes],
        }
    }

    pub fn num_classes(&self) -> usize {
        self.gt_count.len()
    }

    pub fn num_levels(&self) -> usize {
        self.true_positives.first().map_or(0, Vec::len)
    }
}

/// Running totals across every frame fed to the benchmark.
///
/// Only ever grown: merging is element-wise addition, so the result is
/// independent of frame order and partial aggregates can be combined
/// pairwise in a reduction tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub true_positives: Vec<Vec<usize>>,
    pub false_positives: Vec<Vec<usize>>,
    pub false_negatives: Vec<Vec<usize>>,
    pub gt_count: Vec<usize>,
    pub dt_count: Vec<Vec<usize>>,
    /// Number of frames merged in so far.
    pub frames: usize,
}

fn add_rows(into: &mut [Vec<usize>], from: &[Vec<usize>]) {
    for (dst, src) in into.iter_mut().zip(from) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d += s;
        }
    }
}

impl AggregateStats {
    /// All-zero totals for `classes` classes and `levels` ladder levels.
    pub fn zeros(classes: usize, levels: usize) -> Self {
        Self {
            true_positives: vec![vec![0; levels]; classes],
            false_positives: vec![vec![0; levels]; classes],
            false_negatives: vec![vec![0; levels]; classes],
            gt_count: vec![0; classes],
            dt_count: vec![vec![0; levels]; classes],
            frames: 0,
        }
    }

    pub fn num_classes(&self) -> usize {
        self.gt_count.len()
    }

    pub fn num_levels(&self) -> usize {
        self.true_positives.first().map_or(0, Vec::len)
    }

    /// Fold one frame's statistics into the totals.
    ///
    /// Commutative and associative; both sides must share the same
    /// class/level shape (they do when produced by the same benchmark).
    pub fn merge(&mut self, frame: &FrameStats) {
        debug_assert_eq!(self.num_classes(), frame.num_classes());
        debug_assert_eq!(self.num_levels(), frame.num_levels());

        add_rows(&mut self.true_positives, &frame.true_positives);
        add_rows(&mut self.false_positives, &frame.false_positives);
        add_rows(&mut self.false_negatives, &frame.false_negatives);
        add_rows(&mut self.dt_count, &frame.dt_count);
        for (dst, src) in self.gt_count.iter_mut().zip(&frame.gt_count) {
            *dst += src;
        }
        self.frames += 1;
    }

    /// Absorb another partial aggregate (used by the parallel reduction).
    pub fn combine(&mut self, other: &AggregateStats) {
        debug_assert_eq!(self.num_classes(), other.num_classes());
        debug_assert_eq!(self.num_levels(), other.num_levels());

        add_rows(&mut self.true_positives, &other.true_positives);
        add_rows(&mut self.false_positives, &other.false_positives);
        add_rows(&mut self.false_negatives, &other.false_negatives);
        add_rows(&mut self.dt_count, &other.dt_count);
        for (dst, src) in self.gt_count.iter_mut().zip(&other.gt_count) {
            *dst += src;
        }
        self.frames += other.frames;
    }
}
