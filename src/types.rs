//! Core data types for detection targets and their classification tags.

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// A detection category tracked by the benchmark.
///
/// Classes are registered once at benchmark construction and the engine is
/// closed over that set: objects tagged with an unregistered id are
/// silently ignored during matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectClass {
    pub id: u64,
    pub name: String,
}

impl ObjectClass {
    /// Create a new class registry entry.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ranked classification attached to a target.
///
/// Labels are kept sorted by descending score. Only the top-ranked label
/// takes part in matching, so an object carrying several candidate labels
/// is never double-counted across classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectTag {
    labels: Vec<u64>,
    scores: Vec<f64>,
}

impl ObjectTag {
    /// Create a tag from parallel label/score lists.
    ///
    /// The lists are sorted together by descending score (stable, so equal
    /// scores keep their given order).
    ///
    /// # Errors
    ///
    /// Returns an error when the lists are empty or their lengths differ.
    pub fn new(labels: Vec<u64>, scores: Vec<f64>) -> Result<Self> {
        if labels.is_empty() || labels.len() != scores.len() {
            return Err(EvalError::TagLengthMismatch {
                labels: labels.len(),
                scores: scores.len(),
            });
        }

        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self {
            labels: order.iter().map(|&i| labels[i]).collect(),
            scores: order.iter().map(|&i| scores[i]).collect(),
        })
    }

    /// Ground-truth tag: a single label with certainty 1.0.
    pub fn certain(label: u64) -> Self {
        Self {
            labels: vec![label],
            scores: vec![1.0],
        }
    }

    /// Detection tag: a single label with the given confidence.
    pub fn scored(label: u64, score: f64) -> Self {
        Self {
            labels: vec![label],
            scores: vec![score],
        }
    }

    /// The top-ranked label.
    pub fn top_label(&self) -> u64 {
        self.labels[0]
    }

    /// Confidence of the top-ranked label.
    pub fn top_score(&self) -> f64 {
        self.scores[0]
    }

    /// All labels, best first.
    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// All scores, best first.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }
}

/// An oriented 3D bounding box: center, size and yaw around the up axis.
///
/// Geometry is opaque to the matching engine. Overlap between boxes is
/// computed by an external collaborator and handed in as a dense IoU
/// matrix; the fields here exist so that collaborator has something to
/// work from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Box3D {
    /// Center of the box (x, y, z).
    pub center: [f64; 3],
    /// Extent along each body axis (length, width, height).
    pub size: [f64; 3],
    /// Heading angle around the vertical axis, in radians.
    pub yaw: f64,
}

impl Box3D {
    /// Create a new box.
    pub fn new(center: [f64; 3], size: [f64; 3], yaw: f64) -> Self {
        Self { center, size, yaw }
    }

    /// Volume of the box.
    pub fn volume(&self) -> f64 {
        self.size.iter().product()
    }

    /// Check that all extents are positive.
    pub fn is_valid(&self) -> bool {
        self.size.iter().all(|&s| s > 0.0)
    }
}

/// A single ground-truth or detected object: geometry plus classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target3D {
    pub geometry: Box3D,
    pub tag: ObjectTag,
    /// Tracking id, if the producer assigns one. Unused by matching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u64>,
}

impl Target3D {
    /// Create a target without a tracking id.
    pub fn new(geometry: Box3D, tag: ObjectTag) -> Self {
        Self {
            geometry,
            tag,
            track_id: None,
        }
    }

    /// Top-ranked class label of this target.
    pub fn top_label(&self) -> u64 {
        self.tag.top_label()
    }

    /// Confidence of the top-ranked label (1.0 for ground truth).
    pub fn top_score(&self) -> f64 {
        self.tag.top_score()
    }
}

/// Ordered list of targets observed in one frame.
///
/// The `frame` identifier names the sensor/coordinate frame the targets
/// live in; matching refuses to compare lists from different frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    pub targets: Vec<Target3D>,
}

impl TargetList {
    /// Empty list bound to a frame identifier.
    pub fn new(frame: impl Into<String>) -> Self {
        Self {
            frame: Some(frame.into()),
            targets: Vec::new(),
        }
    }

    /// Append a target.
    pub fn push(&mut self, target: Target3D) {
        self.targets.push(target);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target3D> {
        self.targets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Target3D> {
        self.targets.get(index)
    }
}

impl From<Vec<Target3D>> for TargetList {
    fn from(targets: Vec<Target3D>) -> Self {
        Self {
            frame: None,
            targets,
        }
    }
}

impl std::ops::Index<usize> for TargetList {
    type Output = Target3D;

    fn index(&self, index: usize) -> &Target3D {
        &self.targets[index]
    }
}
