//! Daywatch -- daily-activity anomaly detection.
//!
//! This crate models per-event "activity" over a sequence of days. It can
//! simulate activity constrained to per-event target statistics and bounds,
//! learn a statistical baseline from observed activity, and score new days
//! against that baseline, flagging days whose weighted deviation meets the
//! catalog's alert threshold.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod detect;
pub mod simulate;
