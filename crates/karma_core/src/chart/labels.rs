//! Text labels and polyline segments for the score chart.

use crate::chart::plot::{PlotLayout, PlotPoint};
use crate::model::action::OccurredAt;
use crate::series::ScorePoint;

/// Number of trailing points that get a date label.
pub const DEFAULT_DATE_LABEL_COUNT: usize = 5;
/// Scores strictly beyond this magnitude use the strong tone.
pub const STRONG_TONE_THRESHOLD: f64 = 50.0;

const UNKNOWN_DATE_LABEL: &str = "--";

/// Date label under the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    /// Left edge of the label slot.
    pub x: f64,
    /// Slot width shared by all labels of one chart.
    pub width: f64,
}

/// Straight line between two consecutive plot points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub origin_x: f64,
    pub origin_y: f64,
    pub length: f64,
    /// Rotation around the origin, `atan2(dy, dx)`.
    pub angle_radians: f64,
}

/// Display tone for the headline total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    StrongPositive,
    Positive,
    Negative,
    StrongNegative,
}

impl ScoreTone {
    pub fn classify(total: f64) -> Self {
        if total >= 0.0 {
            if total > STRONG_TONE_THRESHOLD {
                Self::StrongPositive
            } else {
                Self::Positive
            }
        } else if total < -STRONG_TONE_THRESHOLD {
            Self::StrongNegative
        } else {
            Self::Negative
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongPositive => "strong_positive",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::StrongNegative => "strong_negative",
        }
    }
}

/// Builds `M/D` labels for the most recent `count` points.
///
/// Labels are spread across the usable width with the same gap guard as
/// plot points, independent of how many points the series has.
pub fn recent_date_labels(
    series: &[ScorePoint],
    layout: &PlotLayout,
    count: usize,
) -> Vec<AxisLabel> {
    let start = series.len().saturating_sub(count);
    let recent = &series[start..];
    let width = layout.step_for(recent.len());

    recent
        .iter()
        .enumerate()
        .map(|(index, point)| AxisLabel {
            text: month_day(&point.occurred_at),
            x: layout.horizontal_padding + index as f64 * width,
            width,
        })
        .collect()
}

/// Per-point score label, rounded half away from zero.
pub fn score_label(score: f64) -> String {
    format!("{:.0}", score.round())
}

pub fn mean_label(mean: f64) -> String {
    format!("{:.1}", (mean * 10.0).round() / 10.0)
}

pub fn total_score_text(total: f64) -> String {
    format!("{:.2}", (total * 100.0).round() / 100.0)
}

/// Line segments joining consecutive points, in plot order.
pub fn segments(points: &[PlotPoint]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let dx = to.x - from.x;
            let dy = to.y - from.y;
            Segment {
                origin_x: from.x,
                origin_y: from.y,
                length: dx.hypot(dy),
                angle_radians: dy.atan2(dx),
            }
        })
        .collect()
}

fn month_day(occurred_at: &OccurredAt) -> String {
    match occurred_at.instant() {
        Some(instant) => instant.format("%-m/%-d").to_string(),
        None => UNKNOWN_DATE_LABEL.to_string(),
    }
}
