//! TOML catalog configuration.
//!
//! The catalog is configured by two documents, mirroring the split between
//! what is tracked and what its expected statistics are:
//!
//! ```toml
//! # events.toml
//! [[event]]
//! name = "logins"
//! kind = "discrete"
//! min = 0
//! weight = 2
//! ```
//!
//! ```toml
//! # stats.toml
//! [[profile]]
//! name = "logins"
//! mean = 4.0
//! std_dev = 1.5
//! ```
//!
//! Omitted event fields resolve to defaults: min 0 for discrete events
//! (unbounded below for continuous), max unbounded, weight 1.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{Catalog, EventDefinition, EventKind, StatProfile};

/// The `[[event]]` document: one entry per tracked event, in scoring order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsFile {
    #[serde(rename = "event")]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    pub name: String,
    pub kind: EventKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub weight: Option<u32>,
}

/// The `[[profile]]` document: target statistics, name-aligned with the
/// events document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsFile {
    #[serde(rename = "profile")]
    pub profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
}

impl EventsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read events file: {}", path.display()))?;
        let file: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse events file: {}", path.display()))?;
        info!(path = %path.display(), events = file.events.len(), "loaded events file");
        Ok(file)
    }

    /// Alert weights in document order, defaults applied.
    pub fn weights(&self) -> Vec<u32> {
        self.events.iter().map(|e| e.weight.unwrap_or(1)).collect()
    }
}

impl StatsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stats file: {}", path.display()))?;
        let file: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse stats file: {}", path.display()))?;
        info!(path = %path.display(), profiles = file.profiles.len(), "loaded stats file");
        Ok(file)
    }
}

/// Resolve defaults and pair the two documents into a validated [`Catalog`].
pub fn build_catalog(events: &EventsFile, stats: &StatsFile) -> Result<Catalog> {
    let definitions = events
        .events
        .iter()
        .map(|e| EventDefinition::new(e.name.clone(), e.kind, e.min, e.max, e.weight))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid event definition")?;

    let profiles = stats
        .profiles
        .iter()
        .map(|p| StatProfile::new(p.name.clone(), p.mean, p.std_dev))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid stat profile")?;

    Catalog::new(definitions, profiles).context("events and stats files are misaligned")
}
