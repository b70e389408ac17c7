//! Per-frame greedy matching of detections to ground truth.

use nalgebra::DMatrix;

use crate::error::{EvalError, Result};
use crate::stats::FrameStats;
use crate::threshold::ThresholdLadder;
use crate::types::TargetList;

/// Matches one frame's detections against its ground truth and fills in
/// per-class, per-level counts.
///
/// The matcher is stateless across frames: [`match_frame`] is a pure
/// function of its inputs, so frames can be processed concurrently and
/// their results merged in any order.
///
/// [`match_frame`]: FrameMatcher::match_frame
#[derive(Debug, Clone)]
pub struct FrameMatcher {
    class_ids: Vec<u64>,
    min_overlaps: Vec<f64>,
    ladder: ThresholdLadder,
}

impl FrameMatcher {
    /// `class_ids` and `min_overlaps` are parallel; the benchmark
    /// constructor validates and broadcasts them before handing them over.
    pub(crate) fn new(
        class_ids: Vec<u64>,
        min_overlaps: Vec<f64>,
        ladder: ThresholdLadder,
    ) -> Self {
        debug_assert_eq!(class_ids.len(), min_overlaps.len());
        Self {
            class_ids,
            min_overlaps,
            ladder,
        }
    }

    /// The threshold ladder this matcher samples against.
    pub fn ladder(&self) -> &ThresholdLadder {
        &self.ladder
    }

    fn class_index(&self, label: u64) -> Option<usize> {
        self.class_ids.iter().position(|&id| id == label)
    }

    /// Match a frame's detections to its ground truth across every ladder
    /// level in a single pass.
    ///
    /// `iou` is the externally computed overlap matrix, rows indexed by
    /// ground truth and columns by detection.
    ///
    /// Matching is greedy: for each ground truth, detections are scanned in
    /// descending-score order (stable, so equal scores keep their input
    /// order) and the first one of the same class whose IoU exceeds the
    /// class overlap threshold is accepted — the scan never continues to
    /// look for a higher IoU further down. An accepted pair is marked
    /// assigned at every level below the detection score's ladder index
    /// where neither side is already taken. Objects whose top label is not
    /// registered are skipped and contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns a precondition violation when the two lists name different
    /// frames, the IoU matrix shape does not match the list lengths, or a
    /// top score on either side falls outside `[min_score, 1]`.
    pub fn match_frame(
        &self,
        ground_truths: &TargetList,
        detections: &TargetList,
        iou: &DMatrix<f64>,
    ) -> Result<FrameStats> {
        if ground_truths.frame != detections.frame {
            return Err(EvalError::FrameMismatch {
                gt: ground_truths.frame.clone(),
                dt: detections.frame.clone(),
            });
        }
        if iou.nrows() != ground_truths.len() || iou.ncols() != detections.len() {
            return Err(EvalError::IouShapeMismatch {
                rows: iou.nrows(),
                cols: iou.ncols(),
                gts: ground_truths.len(),
                dts: detections.len(),
            });
        }
        for target in ground_truths.iter().chain(detections.iter()) {
            self.ladder.check_score(target.top_score())?;
        }

        let levels = self.ladder.len();
        let mut stats = FrameStats::zeros(self.class_ids.len(), levels);

        // Scan order: best score first; stable, so ties keep input order.
        let mut order: Vec<usize> = (0..detections.len()).collect();
        order.sort_by(|&a, &b| {
            detections[b]
                .top_score()
                .partial_cmp(&detections[a].top_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Per-level partial matching between ground-truth and detection
        // indices; each side appears at most once per level.
        let mut dt_assigned = vec![vec![false; detections.len()]; levels];
        let mut gt_assigned = vec![vec![false; ground_truths.len()]; levels];

        for (gt_idx, gt) in ground_truths.iter().enumerate() {
            let Some(class_idx) = self.class_index(gt.top_label()) else {
                continue;
            };

            for &dt_idx in &order {
                let dt = &detections[dt_idx];
                if dt.top_label() != gt.top_label() {
                    continue;
                }

                // First acceptable overlap wins; the scan stops here even
                // if a lower-score detection overlaps more.
                if iou[(gt_idx, dt_idx)] > self.min_overlaps[class_idx] {
                    let cut = self.ladder.index_for_score(dt.top_score());
                    for level in 0..cut {
                        if dt_assigned[level][dt_idx] || gt_assigned[level][gt_idx] {
                            continue;
                        }
                        dt_assigned[level][dt_idx] = true;
                        gt_assigned[level][gt_idx] = true;
                    }
                    break;
                }
            }

            stats.gt_count[class_idx] += 1;
            for level in 0..levels {
                if gt_assigned[level][gt_idx] {
                    stats.true_positives[class_idx][level] += 1;
                } else {
                    stats.false_negatives[class_idx][level] += 1;
                }
            }
        }

        for (dt_idx, dt) in detections.iter().enumerate() {
            let Some(class_idx) = self.class_index(dt.top_label()) else {
                continue;
            };

            let cut = self.ladder.index_for_score(dt.top_score());
            for level in 0..cut {
                stats.dt_count[class_idx][level] += 1;
                if !dt_assigned[level][dt_idx] {
                    stats.false_positives[class_idx][level] += 1;
                }
            }
        }

        Ok(stats)
    }
}
