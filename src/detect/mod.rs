//! Anomaly detection: weighted-deviation scoring of daily observations
//! against a learned baseline.

pub mod scorer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use scorer::{scan, score_day, threshold};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("baseline std dev for event `{event}` is zero; deviation is undefined")]
    ZeroStdDev { event: String },

    #[error("observed {observed} event values, baseline has {baseline} entries")]
    ObservationMismatch { observed: usize, baseline: usize },

    #[error("day {day}: observed {observed} event values, baseline has {baseline} entries")]
    MalformedDay {
        day: usize,
        observed: usize,
        baseline: usize,
    },

    #[error("{weights} weights for {baseline} baseline entries")]
    WeightMismatch { weights: usize, baseline: usize },
}

/// The scored outcome for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayVerdict {
    /// 1-based day number within the scanned batch.
    pub day: usize,
    /// Sum over events of `weight × |observed − mean| / std_dev`.
    pub score: f64,
    /// Whether the score met or exceeded the threshold.
    pub flagged: bool,
}

/// Outcome of scanning a batch of days against a baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub threshold: f64,
    pub verdicts: Vec<DayVerdict>,
    /// True if any day in the batch was flagged.
    pub any_flagged: bool,
}
