//! Score chart use-case service.
//!
//! # Responsibility
//! - Run one refresh: fetch snapshot, derive series, lay out the chart.
//! - Delegate snapshot retrieval to an `ActionSource`.
//!
//! # Invariants
//! - Every refresh fully replaces previously derived state; nothing is
//!   cached between calls.
//! - Log lines carry counts only, never notes or moods.

use crate::chart::{
    build_plot_with, mean_label, recent_date_labels, segments, total_score_text, AxisLabel,
    Plot, ScoreTone, Segment,
};
use crate::config::ChartConfig;
use crate::model::action::Action;
use crate::series::{build_series, summarize, ScorePoint, SeriesSummary};
use crate::source::action_source::{ActionSource, SourceError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Source(SourceError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "chart refresh failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
        }
    }
}

impl From<SourceError> for ServiceError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Headline text shown above the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub total_score: f64,
    pub total_text: String,
    pub tone: ScoreTone,
    pub mean_text: String,
}

/// Everything a renderer needs for one chart frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KarmaChart {
    pub series: Vec<ScorePoint>,
    /// `None` when the user has no history yet.
    pub summary: Option<SeriesSummary>,
    pub headline: Option<Headline>,
    pub plot: Plot,
    pub date_labels: Vec<AxisLabel>,
    pub segments: Vec<Segment>,
}

impl KarmaChart {
    pub fn has_history(&self) -> bool {
        self.summary.is_some()
    }
}

/// Derives a chart from an already fetched snapshot.
pub fn chart_from_actions(
    actions: &[Action],
    config: &ChartConfig,
    screen_width: f64,
) -> KarmaChart {
    let series = build_series(actions);
    let summary = summarize(&series);
    let layout = config.layout_for_screen(screen_width);
    let plot = build_plot_with(&series, &layout);
    let date_labels = recent_date_labels(&series, &layout, config.label_count);
    let polyline = segments(&plot.points);
    let headline = summary.map(|summary| Headline {
        total_score: summary.latest,
        total_text: total_score_text(summary.latest),
        tone: ScoreTone::classify(summary.latest),
        mean_text: mean_label(summary.mean),
    });

    KarmaChart {
        series,
        summary,
        headline,
        plot,
        date_labels,
        segments: polyline,
    }
}

/// Use-case service wrapper for chart refreshes.
pub struct ChartService<S: ActionSource> {
    source: S,
    config: ChartConfig,
}

impl<S: ActionSource> ChartService<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ChartConfig::default())
    }

    pub fn with_config(source: S, config: ChartConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Fetches a fresh snapshot and derives the chart for `screen_width`.
    ///
    /// Source errors are returned unchanged inside `ServiceError::Source`.
    pub fn refresh(&self, screen_width: f64) -> ServiceResult<KarmaChart> {
        let actions = match self.source.fetch_actions() {
            Ok(actions) => actions,
            Err(err) => {
                error!("event=chart_refresh module=service status=error error={err}");
                return Err(err.into());
            }
        };

        let chart = chart_from_actions(&actions, &self.config, screen_width);
        info!(
            "event=chart_refresh module=service status=ok actions={} points={} zero_line={} mean_line={}",
            actions.len(),
            chart.plot.points.len(),
            chart.plot.zero_y.in_bounds,
            chart.plot.mean_y.in_bounds
        );
        Ok(chart)
    }
}
