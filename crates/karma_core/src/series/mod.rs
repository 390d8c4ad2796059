//! Score series derivation.
//!
//! # Responsibility
//! - Fold logged actions into the cumulative score timeline.

pub mod builder;

pub use builder::{build_series, summarize, ScorePoint, SeriesSummary};
