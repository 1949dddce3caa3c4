//! Yodha confluence engine.
//!
//! Fuses options flow, dark-pool prints, news headlines, relative strength
//! and an optional ML prediction into per-domain signals and a single
//! session-aware trade thesis.

pub mod common;
pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod signals;
pub mod thesis;
