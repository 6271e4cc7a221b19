//! Bounded Gaussian sampling for a single event.
//!
//! Draws a series of daily values around a target mean/standard deviation,
//! clipped to the event's bounds by redrawing individual days, then accepts
//! or rejects the whole batch based on how close its empirical statistics
//! land to the targets. Tight bounds or a standard deviation much larger
//! than the bound width can make the targets unreachable, so both loops are
//! capped and exhaust into a typed error instead of spinning forever.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::catalog::{EventDefinition, EventSeries, StatProfile};

use super::SimulateError;

/// Iteration caps for the sampler's two rejection loops.
#[derive(Debug, Clone, Copy)]
pub struct SamplerLimits {
    /// Redraws allowed for a single day's value before the event's bounds
    /// are declared unreachable.
    pub max_draws_per_value: u32,
    /// Whole-batch attempts allowed before the tolerance test is declared
    /// unsatisfiable.
    pub max_batch_attempts: u32,
}

impl Default for SamplerLimits {
    fn default() -> Self {
        Self {
            max_draws_per_value: 10_000,
            max_batch_attempts: 1_000,
        }
    }
}

/// Relative tolerance for the batch acceptance test. Small batches vary
/// more from the target statistics, so they get the wider band.
fn tolerance(days: usize) -> f64 {
    if days >= 10 {
        0.05
    } else {
        0.10
    }
}

/// Generate one statistically validated series of `days` values for `event`.
///
/// Each value is `mean + std_dev × Z` (standard normal `Z`), quantized per
/// the event kind and redrawn in place while outside `[min, max]`. A
/// finished batch is accepted only if its empirical mean and standard
/// deviation (population form) are each within [`tolerance`] of the
/// profile's targets; otherwise the batch is discarded and rebuilt.
///
/// Pure in everything but `rng`; a seeded generator reproduces the series.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    event: &EventDefinition,
    profile: &StatProfile,
    days: usize,
    limits: &SamplerLimits,
) -> Result<EventSeries, SimulateError> {
    if days == 0 {
        return Err(SimulateError::InvalidDays);
    }

    let tol = tolerance(days);

    for _ in 0..limits.max_batch_attempts {
        let mut values = Vec::with_capacity(days);
        for _ in 0..days {
            values.push(draw_bounded(rng, event, profile, limits)?);
        }

        if batch_accepted(&values, profile, tol) {
            return Ok(EventSeries {
                name: event.name.clone(),
                values,
            });
        }
    }

    Err(SimulateError::ToleranceNotMet {
        event: event.name.clone(),
        attempts: limits.max_batch_attempts,
        mean: profile.mean,
        std_dev: profile.std_dev,
    })
}

/// Draw a single in-bounds value, redrawing on bound violations.
fn draw_bounded<R: Rng + ?Sized>(
    rng: &mut R,
    event: &EventDefinition,
    profile: &StatProfile,
    limits: &SamplerLimits,
) -> Result<f64, SimulateError> {
    for _ in 0..limits.max_draws_per_value {
        let z: f64 = rng.sample(StandardNormal);
        let value = event.kind.quantize(profile.mean + profile.std_dev * z);
        if event.contains(value) {
            return Ok(value);
        }
    }

    Err(SimulateError::InfeasibleBounds {
        event: event.name.clone(),
        attempts: limits.max_draws_per_value,
        mean: profile.mean,
        std_dev: profile.std_dev,
        min: event.min,
        max: event.max,
    })
}

/// The batch acceptance test: empirical mean and standard deviation must
/// both land within `tol` (relative) of the targets.
///
/// At a target mean of exactly 0 the relative band is degenerate, so the
/// mean check falls back to an absolute band of width `tol`.
fn batch_accepted(values: &[f64], profile: &StatProfile, tol: f64) -> bool {
    let (mean, std_dev) = empirical_stats(values);

    let mean_ok = if profile.mean == 0.0 {
        mean.abs() <= tol
    } else {
        (mean - profile.mean).abs() <= tol * profile.mean.abs()
    };

    let std_ok = (std_dev - profile.std_dev).abs() <= tol * profile.std_dev;

    mean_ok && std_ok
}

/// Empirical mean and population (divide-by-n) standard deviation.
pub(crate) fn empirical_stats(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
