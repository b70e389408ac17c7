//! Metric derivations from accumulated matching counts.

pub mod ap;
pub mod fbeta;
pub mod precision_recall;

pub use ap::average_precision;
pub use fbeta::{best_operating_point, f1_score, fbeta_score, OperatingPoint};
pub use precision_recall::{precision_from_counts, recall_from_counts};
