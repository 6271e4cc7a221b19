//! Event catalog: the data model shared by the simulator, the baseline
//! estimator, and the anomaly scorer.
//!
//! A catalog pairs an ordered list of [`EventDefinition`]s (what is tracked,
//! its bounds, its alert weight) with an equally long, name-aligned list of
//! [`StatProfile`]s (the target mean and standard deviation used when
//! simulating activity). The pairing is validated once, at construction;
//! downstream components rely on it and never re-check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has {events} events but {profiles} stat profiles")]
    CountMismatch { events: usize, profiles: usize },

    #[error("entry {index}: event `{event}` is paired with stat profile `{profile}`")]
    NameMismatch {
        index: usize,
        event: String,
        profile: String,
    },

    #[error("event `{event}`: min bound {min} exceeds max bound {max}")]
    InvalidBounds { event: String, min: f64, max: f64 },

    #[error("event `{event}`: weight must be at least 1")]
    InvalidWeight { event: String },

    #[error("profile `{profile}`: standard deviation {std_dev} is negative")]
    NegativeStdDev { profile: String, std_dev: f64 },
}

/// Whether an event's daily value is a count or a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Integral values (e.g. number of logins). Samples round to the
    /// nearest whole number.
    Discrete,
    /// Fractional values (e.g. hours online). Samples round to 2 decimals.
    Continuous,
}

impl EventKind {
    /// Apply this kind's rounding policy to a raw sample. Discrete halves
    /// round toward positive infinity, so -1.5 becomes -1.
    pub fn quantize(self, sample: f64) -> f64 {
        match self {
            EventKind::Discrete => (sample + 0.5).floor(),
            EventKind::Continuous => round2(sample),
        }
    }

    fn default_min(self) -> f64 {
        match self {
            // Counts cannot go negative.
            EventKind::Discrete => 0.0,
            EventKind::Continuous => f64::NEG_INFINITY,
        }
    }
}

/// Round to 2 decimal places, the precision every derived statistic is
/// reported at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One tracked event: identity, value domain, and its weight in the
/// anomaly score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub kind: EventKind,
    pub min: f64,
    pub max: f64,
    pub weight: u32,
}

impl EventDefinition {
    /// Build a definition, resolving unset fields to their defaults:
    /// min 0 for discrete events (unbounded below for continuous),
    /// max unbounded, weight 1.
    pub fn new(
        name: impl Into<String>,
        kind: EventKind,
        min: Option<f64>,
        max: Option<f64>,
        weight: Option<u32>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        let min = min.unwrap_or_else(|| kind.default_min());
        let max = max.unwrap_or(f64::INFINITY);
        if min > max {
            return Err(CatalogError::InvalidBounds { event: name, min, max });
        }
        let weight = weight.unwrap_or(1);
        if weight == 0 {
            return Err(CatalogError::InvalidWeight { event: name });
        }
        Ok(Self {
            name,
            kind,
            min,
            max,
            weight,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Target statistics used when simulating an event's activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatProfile {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
}

impl StatProfile {
    pub fn new(
        name: impl Into<String>,
        mean: f64,
        std_dev: f64,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if std_dev < 0.0 {
            return Err(CatalogError::NegativeStdDev {
                profile: name,
                std_dev,
            });
        }
        Ok(Self { name, mean, std_dev })
    }
}

/// The values observed (or generated) for one event across a run of days.
///
/// Ordered by day; length equals the number of days simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// An ordered, name-aligned pairing of event definitions and stat profiles.
///
/// Order is significant: generated datasets, baselines, and weights all
/// align positionally with the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    events: Vec<EventDefinition>,
    profiles: Vec<StatProfile>,
}

impl Catalog {
    /// Pair events with profiles, rejecting count or per-entry name
    /// mismatches.
    pub fn new(
        events: Vec<EventDefinition>,
        profiles: Vec<StatProfile>,
    ) -> Result<Self, CatalogError> {
        if events.len() != profiles.len() {
            return Err(CatalogError::CountMismatch {
                events: events.len(),
                profiles: profiles.len(),
            });
        }
        for (index, (event, profile)) in events.iter().zip(&profiles).enumerate() {
            if event.name != profile.name {
                return Err(CatalogError::NameMismatch {
                    index,
                    event: event.name.clone(),
                    profile: profile.name.clone(),
                });
            }
        }
        Ok(Self { events, profiles })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[EventDefinition] {
        &self.events
    }

    pub fn profiles(&self) -> &[StatProfile] {
        &self.profiles
    }

    /// Iterate events with their matching profiles, in catalog order.
    pub fn pairs(&self) -> impl Iterator<Item = (&EventDefinition, &StatProfile)> {
        self.events.iter().zip(self.profiles.iter())
    }

    /// Alert weights in catalog order.
    pub fn weights(&self) -> Vec<u32> {
        self.events.iter().map(|e| e.weight).collect()
    }
}
