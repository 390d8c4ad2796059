//! Core domain logic for the karma score client.
//! This crate is the single source of truth for score invariants.

pub mod chart;
pub mod config;
pub mod draft;
pub mod logging;
pub mod model;
pub mod series;
pub mod service;
pub mod snapshot;
pub mod source;

pub use chart::{
    build_plot, build_plot_with, AxisLabel, Plot, PlotLayout, PlotPoint, PlotScale,
    ReferenceLine, ScoreTone, Segment,
};
pub use config::{ChartConfig, ConfigError, ConfigResult};
pub use draft::{estimate_score_delta, ActionDraft, ActionSubmission, DraftError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::action::{Action, ActionId, ActionValidationError, Category, OccurredAt};
pub use series::{build_series, summarize, ScorePoint, SeriesSummary};
pub use service::chart_service::{
    chart_from_actions, ChartService, Headline, KarmaChart, ServiceError, ServiceResult,
};
pub use snapshot::{
    decode_action_list, decode_total_score, read_snapshot_file, SnapshotError, SnapshotResult,
};
pub use source::action_source::{
    ActionSource, FileSnapshotSource, JsonSnapshotSource, SourceError, SourceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
