//! Baseline estimation from observed activity.
//!
//! Given the recorded value series for each event, derive the per-event
//! mean and standard deviation the anomaly scorer measures against.
//! Deterministic; every statistic is reported at 2-decimal precision, and
//! later stages are computed from the already-rounded earlier ones (the
//! variance uses the rounded mean, the standard deviation the rounded
//! variance).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{round2, EventSeries};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("event `{event}` has no observations; a baseline needs at least one value")]
    EmptySeries { event: String },
}

/// Derived statistics for one event. Shaped like a stat profile, but
/// computed from history rather than configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStats {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-event statistics derived from an observed corpus, in the same order
/// as the input series (and therefore the catalog).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub entries: Vec<EventStats>,
}

impl Baseline {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the baseline for a corpus of observed series.
///
/// For each event: mean, population variance (divide by n), and standard
/// deviation, each rounded to 2 decimals. An event with no observations is
/// an error, never a zero mean.
pub fn estimate_baseline(observations: &[EventSeries]) -> Result<Baseline, AnalysisError> {
    let mut entries = Vec::with_capacity(observations.len());

    for series in observations {
        if series.values.is_empty() {
            return Err(AnalysisError::EmptySeries {
                event: series.name.clone(),
            });
        }

        let n = series.values.len() as f64;
        let mean = round2(series.values.iter().sum::<f64>() / n);
        let variance = round2(
            series
                .values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / n,
        );
        let std_dev = round2(variance.sqrt());

        entries.push(EventStats {
            name: series.name.clone(),
            mean,
            std_dev,
        });
    }

    Ok(Baseline { entries })
}
