//! Hand-rolled line chart geometry.
//!
//! # Responsibility
//! - Convert a score series into pixel coordinates for a polyline chart.
//! - Produce the labels and segments a renderer draws around it.
//!
//! # Invariants
//! - No axis ticks, adaptive scaling or animation state: min/max
//!   normalization only.

pub mod labels;
pub mod plot;

pub use labels::{
    mean_label, recent_date_labels, score_label, segments, total_score_text, AxisLabel,
    ScoreTone, Segment, DEFAULT_DATE_LABEL_COUNT,
};
pub use plot::{
    build_plot, build_plot_with, Plot, PlotLayout, PlotPoint, PlotScale, ReferenceLine,
    DEFAULT_HORIZONTAL_PADDING,
};
