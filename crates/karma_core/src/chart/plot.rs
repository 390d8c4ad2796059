//! Pixel-space geometry for the cumulative score line chart.
//!
//! # Responsibility
//! - Map a score series onto a fixed canvas with min/max normalization.
//! - Place the zero and mean reference lines with the same mapping.
//!
//! # Invariants
//! - `points.len() == series.len()`.
//! - Higher scores map to smaller `y` (top of the canvas).
//! - A flat series uses a unit range; no division by zero for any input.
//! - Output is a pure function of series and layout.

use crate::series::ScorePoint;

/// Default left/right inset of the first and last point.
pub const DEFAULT_HORIZONTAL_PADDING: f64 = 20.0;

/// Canvas dimensions used for one plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub horizontal_padding: f64,
}

impl PlotLayout {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            horizontal_padding: DEFAULT_HORIZONTAL_PADDING,
        }
    }

    pub fn with_padding(mut self, horizontal_padding: f64) -> Self {
        self.horizontal_padding = horizontal_padding;
        self
    }

    /// Width between the left and right padding, never negative.
    pub fn usable_width(&self) -> f64 {
        let width = self.canvas_width - 2.0 * self.horizontal_padding;
        if width.is_finite() {
            width.max(0.0)
        } else {
            0.0
        }
    }

    /// Horizontal distance between consecutive slots for `count` items.
    pub fn step_for(&self, count: usize) -> f64 {
        let gaps = if count <= 1 { 1 } else { count - 1 };
        self.usable_width() / gaps as f64
    }
}

/// Linear score-to-pixel mapping of one plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    pub min: f64,
    /// `max - min`, or `1.0` for a flat series.
    pub range: f64,
    pub canvas_height: f64,
}

impl PlotScale {
    fn from_scores(scores: impl Iterator<Item = f64>, canvas_height: f64) -> Self {
        let (min, max) = scores.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), score| {
            (lo.min(score), hi.max(score))
        });
        let (min, max) = if min.is_finite() && max.is_finite() {
            (min, max)
        } else {
            (0.0, 0.0)
        };
        let range = if max == min { 1.0 } else { max - min };
        Self {
            min,
            range,
            canvas_height,
        }
    }

    pub fn y_for(&self, score: f64) -> f64 {
        self.canvas_height * (1.0 - (score - self.min) / self.range)
    }

    /// Inverse of [`PlotScale::y_for`].
    ///
    /// Returns `min` for a zero-height canvas, where every score collapses
    /// onto the same pixel row.
    pub fn score_at(&self, y: f64) -> f64 {
        if self.canvas_height == 0.0 {
            return self.min;
        }
        self.min + (1.0 - y / self.canvas_height) * self.range
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= 0.0 && y <= self.canvas_height
    }
}

/// One plotted vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub cumulative_score: f64,
}

/// Horizontal reference line.
///
/// Renderers must skip lines whose `in_bounds` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLine {
    pub score: f64,
    pub y: f64,
    pub in_bounds: bool,
}

impl ReferenceLine {
    fn mapped(scale: &PlotScale, score: f64) -> Self {
        let y = scale.y_for(score);
        Self {
            score,
            y,
            in_bounds: scale.contains_y(y),
        }
    }

    fn hidden(scale: &PlotScale) -> Self {
        Self {
            score: 0.0,
            y: scale.canvas_height,
            in_bounds: false,
        }
    }
}

/// Plot geometry for one series and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub points: Vec<PlotPoint>,
    pub zero_y: ReferenceLine,
    pub mean_y: ReferenceLine,
    pub scale: PlotScale,
    pub layout: PlotLayout,
}

impl Plot {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds plot geometry using the default horizontal padding.
pub fn build_plot(series: &[ScorePoint], canvas_width: f64, canvas_height: f64) -> Plot {
    build_plot_with(series, &PlotLayout::new(canvas_width, canvas_height))
}

/// Builds plot geometry for an explicit layout.
///
/// An empty series yields no points and hides both reference lines.
pub fn build_plot_with(series: &[ScorePoint], layout: &PlotLayout) -> Plot {
    let scale = PlotScale::from_scores(
        series.iter().map(|point| point.cumulative_score),
        layout.canvas_height,
    );
    let step = layout.step_for(series.len());

    let points = series
        .iter()
        .enumerate()
        .map(|(index, point)| PlotPoint {
            x: layout.horizontal_padding + index as f64 * step,
            y: scale.y_for(point.cumulative_score),
            cumulative_score: point.cumulative_score,
        })
        .collect::<Vec<_>>();

    let (zero_y, mean_y) = if series.is_empty() {
        (ReferenceLine::hidden(&scale), ReferenceLine::hidden(&scale))
    } else {
        let mean = series.iter().map(|point| point.cumulative_score).sum::<f64>()
            / series.len() as f64;
        (
            ReferenceLine::mapped(&scale, 0.0),
            ReferenceLine::mapped(&scale, mean),
        )
    };

    Plot {
        points,
        zero_y,
        mean_y,
        scale,
        layout: *layout,
    }
}
