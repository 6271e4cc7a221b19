//! Weighted-deviation scoring.
//!
//! A day's score is the weighted sum of each event's absolute deviation
//! from its baseline mean, in baseline standard deviations. Observations,
//! baseline entries, and weights are matched by position; callers are
//! responsible for supplying all three in catalog order, and mismatched
//! lengths are rejected at the boundary.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::Baseline;

use super::{DayVerdict, DetectError, ScanReport};

/// The alert threshold for a catalog: twice the sum of all event weights.
pub fn threshold(weights: &[u32]) -> f64 {
    2.0 * weights.iter().map(|&w| f64::from(w)).sum::<f64>()
}

/// Score one day of observations against the baseline.
///
/// Errors if the three inputs disagree in length or if any baseline entry
/// has a zero standard deviation (the deviation quotient would be
/// infinite, which must surface as an error, not a NaN score).
pub fn score_day(
    observed: &[f64],
    baseline: &Baseline,
    weights: &[u32],
) -> Result<f64, DetectError> {
    if weights.len() != baseline.len() {
        return Err(DetectError::WeightMismatch {
            weights: weights.len(),
            baseline: baseline.len(),
        });
    }
    if observed.len() != baseline.len() {
        return Err(DetectError::ObservationMismatch {
            observed: observed.len(),
            baseline: baseline.len(),
        });
    }

    let mut score = 0.0;
    for ((value, stats), &weight) in observed.iter().zip(&baseline.entries).zip(weights) {
        if stats.std_dev == 0.0 {
            return Err(DetectError::ZeroStdDev {
                event: stats.name.clone(),
            });
        }
        score += f64::from(weight) * (value - stats.mean).abs() / stats.std_dev;
    }
    Ok(score)
}

/// Score every day in a batch and flag those at or above the threshold.
///
/// Day numbering in the verdicts is 1-based.
pub fn scan(
    days: &[Vec<f64>],
    baseline: &Baseline,
    weights: &[u32],
) -> Result<ScanReport, DetectError> {
    let threshold = threshold(weights);
    info!(days = days.len(), threshold, "scanning for anomalous days");

    let mut verdicts = Vec::with_capacity(days.len());
    let mut any_flagged = false;

    for (index, observed) in days.iter().enumerate() {
        let day = index + 1;
        let score = score_day(observed, baseline, weights).map_err(|e| match e {
            DetectError::ObservationMismatch { observed, baseline } => {
                DetectError::MalformedDay {
                    day,
                    observed,
                    baseline,
                }
            }
            other => other,
        })?;

        let flagged = score >= threshold;
        if flagged {
            warn!(day, score, threshold, "anomalous day");
            any_flagged = true;
        }
        verdicts.push(DayVerdict { day, score, flagged });
    }

    Ok(ScanReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        threshold,
        verdicts,
        any_flagged,
    })
}
