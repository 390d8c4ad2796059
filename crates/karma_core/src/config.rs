//! Chart layout configuration.
//!
//! # Responsibility
//! - Hold the fixed layout constants of the score chart.
//! - Load overrides from JSON and reject unusable values.
//!
//! # Invariants
//! - A validated config always yields a non-negative plot width.

use crate::chart::{PlotLayout, DEFAULT_DATE_LABEL_COUNT, DEFAULT_HORIZONTAL_PADDING};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_CANVAS_HEIGHT: f64 = 200.0;
const DEFAULT_SCREEN_MARGIN: f64 = 40.0;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    /// Field holds a negative or non-finite number.
    InvalidValue {
        field: &'static str,
        value: f64,
    },
    ZeroLabelCount,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read chart config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid chart config: {err}"),
            Self::InvalidValue { field, value } => {
                write!(f, "chart config `{field}` must be finite and >= 0, got {value}")
            }
            Self::ZeroLabelCount => write!(f, "chart config `label_count` must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidValue { .. } => None,
            Self::ZeroLabelCount => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Score chart layout settings.
///
/// The canvas width is not configured: it follows the host screen width
/// minus `screen_margin`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub canvas_height: f64,
    pub horizontal_padding: f64,
    /// Total horizontal margin around the chart card.
    pub screen_margin: f64,
    /// How many trailing points get a date label.
    pub label_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            horizontal_padding: DEFAULT_HORIZONTAL_PADDING,
            screen_margin: DEFAULT_SCREEN_MARGIN,
            label_count: DEFAULT_DATE_LABEL_COUNT,
        }
    }
}

impl ChartConfig {
    /// Parses and validates a JSON config; omitted fields keep defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&body)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("canvas_height", self.canvas_height),
            ("horizontal_padding", self.horizontal_padding),
            ("screen_margin", self.screen_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        if self.label_count == 0 {
            return Err(ConfigError::ZeroLabelCount);
        }
        Ok(())
    }

    /// Plot layout for a host screen of `screen_width` logical pixels.
    ///
    /// A non-finite width yields an empty canvas.
    pub fn layout_for_screen(&self, screen_width: f64) -> PlotLayout {
        let canvas_width = if screen_width.is_finite() {
            (screen_width - self.screen_margin).max(0.0)
        } else {
            0.0
        };
        PlotLayout::new(canvas_width, self.canvas_height).with_padding(self.horizontal_padding)
    }
}
