//! Score-threshold ladder construction and lookup.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// How PR sample thresholds are spaced over `[min_score, 1]`.
///
/// Linear spacing over-represents the flat middle of a PR curve; the log
/// modes concentrate samples near score 1, where the curve changes
/// fastest, giving smoother AP estimates from the same sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Evenly spaced thresholds.
    Linear,
    /// Geometric spacing with the given base (>= 2).
    Log(u32),
}

impl FromStr for ScaleMode {
    type Err = EvalError;

    /// Parse `"linear"`, `"log"` (base 10) or `"logN"` with integer N >= 2.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log(10)),
            _ => {
                if let Some(base) = s.strip_prefix("log") {
                    if let Ok(base) = base.parse::<u32>() {
                        if base >= 2 {
                            return Ok(Self::Log(base));
                        }
                    }
                }
                Err(EvalError::UnknownScaleMode(s.to_string()))
            }
        }
    }
}

/// The ascending sequence of confidence thresholds at which PR statistics
/// are sampled.
///
/// Built once per benchmark and immutable afterwards. Index 0 always holds
/// the lowest threshold (`min_score`); the top of the ladder stays
/// strictly below 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdLadder {
    thresholds: Vec<f64>,
    min_score: f64,
}

impl ThresholdLadder {
    /// Build a ladder of `count` thresholds over `[min_score, 1)`.
    ///
    /// For [`ScaleMode::Log`], `count + 1` geometrically spaced points over
    /// `[1, base]` are remapped affinely onto `[min_score, 1]`, mirrored so
    /// the fine spacing lands near score 1, and kept ascending with the
    /// `1.0` endpoint dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLadder` when `count` is zero, `min_score` falls
    /// outside `[0, 1)`, or a log base below 2 is supplied directly.
    pub fn build(count: usize, min_score: f64, scale: ScaleMode) -> Result<Self> {
        if count == 0 {
            return Err(EvalError::InvalidLadder(
                "sample count must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&min_score) {
            return Err(EvalError::InvalidLadder(format!(
                "min_score must lie in [0, 1), got {min_score}"
            )));
        }

        let span = 1.0 - min_score;
        let thresholds = match scale {
            ScaleMode::Linear => (0..count)
                .map(|i| min_score + span * i as f64 / count as f64)
                .collect(),
            ScaleMode::Log(base) => {
                if base < 2 {
                    return Err(EvalError::InvalidLadder(format!(
                        "log base must be at least 2, got {base}"
                    )));
                }
                let base = f64::from(base);
                (1..=count)
                    .rev()
                    .map(|i| {
                        let g = base.powf(i as f64 / count as f64);
                        1.0 - (g - 1.0) * span / (base - 1.0)
                    })
                    .collect()
            }
        };

        Ok(Self {
            thresholds,
            min_score,
        })
    }

    /// Number of ladder levels.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Lowest score the benchmark accepts.
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// The thresholds, ascending.
    pub fn as_slice(&self) -> &[f64] {
        &self.thresholds
    }

    /// Threshold at a given level.
    pub fn get(&self, level: usize) -> Option<f64> {
        self.thresholds.get(level).copied()
    }

    /// Lowest ladder position whose threshold is >= `score`.
    ///
    /// A detection with this score is present at exactly the levels below
    /// the returned index (the thresholds it strictly exceeds).
    pub fn index_for_score(&self, score: f64) -> usize {
        self.thresholds.partition_point(|&t| t < score)
    }

    /// Validate a caller-supplied confidence score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreOutOfRange` unless `min_score <= score <= 1`.
    pub fn check_score(&self, score: f64) -> Result<()> {
        if !(self.min_score..=1.0).contains(&score) {
            return Err(EvalError::ScoreOutOfRange {
                score,
                min_score: self.min_score,
            });
        }
        Ok(())
    }

    /// Ladder level that metric queries read for a reporting score.
    ///
    /// `None` selects the ladder midpoint, the "typical operating point".
    /// An explicit score selects the level just below its insertion point,
    /// saturating at level 0 for scores at or below the lowest threshold.
    pub fn reporting_index(&self, score: Option<f64>) -> usize {
        match score {
            None => self.thresholds.len() / 2,
            Some(s) => self.index_for_score(s).saturating_sub(1),
        }
    }
}
