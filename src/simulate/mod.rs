//! Activity simulation: per-event bounded sampling and dataset assembly.

pub mod sampler;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Catalog, EventSeries};

pub use sampler::{generate_series, SamplerLimits};

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("days must be greater than zero")]
    InvalidDays,

    #[error(
        "event `{event}`: no in-bounds sample after {attempts} draws \
         (mean {mean}, std dev {std_dev}, bounds [{min}, {max}])"
    )]
    InfeasibleBounds {
        event: String,
        attempts: u32,
        mean: f64,
        std_dev: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "event `{event}`: no batch met the tolerance test after {attempts} attempts \
         (mean {mean}, std dev {std_dev})"
    )]
    ToleranceNotMet {
        event: String,
        attempts: u32,
        mean: f64,
        std_dev: f64,
    },

    #[error("series `{event}` has {len} values in a {days}-day dataset")]
    SeriesLengthMismatch {
        event: String,
        len: usize,
        days: usize,
    },
}

/// A full run of simulated activity: one series per catalog event, in
/// catalog order, each `days` values long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub days: usize,
    pub series: Vec<EventSeries>,
}

impl Dataset {
    /// Transpose into per-day rows of per-event values, the shape the
    /// anomaly scorer consumes. Row order matches day order; column order
    /// matches catalog order.
    ///
    /// Datasets built by [`assemble`] always satisfy the length invariant,
    /// but a dataset deserialized from elsewhere may not; a series whose
    /// length disagrees with `days` is an error.
    pub fn day_rows(&self) -> Result<Vec<Vec<f64>>, SimulateError> {
        for s in &self.series {
            if s.values.len() != self.days {
                return Err(SimulateError::SeriesLengthMismatch {
                    event: s.name.clone(),
                    len: s.values.len(),
                    days: self.days,
                });
            }
        }
        Ok((0..self.days)
            .map(|day| self.series.iter().map(|s| s.values[day]).collect())
            .collect())
    }
}

/// Generate a validated series for every event in the catalog.
///
/// Events are processed in catalog order; downstream consumers align with
/// the catalog by position. The first event whose parameters prove
/// infeasible aborts the run.
pub fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    days: usize,
    limits: &SamplerLimits,
) -> Result<Dataset, SimulateError> {
    info!(days, events = catalog.len(), "generating activity dataset");

    let mut series = Vec::with_capacity(catalog.len());
    for (event, profile) in catalog.pairs() {
        debug!(
            event = %event.name,
            mean = profile.mean,
            std_dev = profile.std_dev,
            "sampling event"
        );
        series.push(generate_series(rng, event, profile, days, limits)?);
    }

    Ok(Dataset { days, series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EventDefinition, EventKind, StatProfile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_catalog() -> Catalog {
        let events = vec![
            EventDefinition::new("logins", EventKind::Discrete, Some(0.0), None, Some(2))
                .unwrap(),
            EventDefinition::new("hours", EventKind::Continuous, Some(0.0), Some(24.0), None)
                .unwrap(),
        ];
        let profiles = vec![
            StatProfile::new("logins", 9.0, 2.0).unwrap(),
            StatProfile::new("hours", 6.5, 1.5).unwrap(),
        ];
        Catalog::new(events, profiles).unwrap()
    }

    #[test]
    fn test_assemble_one_series_per_event_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let dataset =
            assemble(&mut rng, &small_catalog(), 20, &SamplerLimits::default()).unwrap();

        assert_eq!(dataset.days, 20);
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.series[0].name, "logins");
        assert_eq!(dataset.series[1].name, "hours");
        assert!(dataset.series.iter().all(|s| s.values.len() == 20));
    }

    #[test]
    fn test_day_rows_transposes_by_position() {
        let dataset = Dataset {
            days: 2,
            series: vec![
                EventSeries {
                    name: "a".into(),
                    values: vec![1.0, 2.0],
                },
                EventSeries {
                    name: "b".into(),
                    values: vec![10.0, 20.0],
                },
            ],
        };
        assert_eq!(
            dataset.day_rows().unwrap(),
            vec![vec![1.0, 10.0], vec![2.0, 20.0]]
        );
    }

    #[test]
    fn test_day_rows_rejects_truncated_series() {
        // A hand-edited or corrupted dataset can claim more days than a
        // series holds; that must surface as an error, not a panic.
        let dataset = Dataset {
            days: 3,
            series: vec![EventSeries {
                name: "logins".into(),
                values: vec![1.0, 2.0],
            }],
        };
        let err = dataset.day_rows().unwrap_err();
        assert!(matches!(
            err,
            SimulateError::SeriesLengthMismatch {
                len: 2,
                days: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_assemble_propagates_sampler_errors() {
        let events = vec![EventDefinition::new(
            "stuck",
            EventKind::Discrete,
            Some(0.0),
            Some(1.0),
            None,
        )
        .unwrap()];
        let profiles = vec![StatProfile::new("stuck", 900.0, 1.0).unwrap()];
        let catalog = Catalog::new(events, profiles).unwrap();

        let limits = SamplerLimits {
            max_draws_per_value: 100,
            max_batch_attempts: 5,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let err = assemble(&mut rng, &catalog, 10, &limits).unwrap_err();
        assert!(matches!(err, SimulateError::InfeasibleBounds { .. }));
    }
}
