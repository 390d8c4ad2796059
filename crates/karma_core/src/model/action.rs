//! Action domain model.
//!
//! # Responsibility
//! - Define the canonical logged-action record fetched from the remote API.
//! - Define the total ordering used to place actions on the timeline.
//!
//! # Invariants
//! - `id` is non-blank and unique within one snapshot.
//! - Actions are immutable once decoded; derived views never mutate them.
//! - `OccurredAt` ordering is total: parsed instants first, then raw text.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable server-assigned identifier of one action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(String);

impl ActionId {
    /// Wraps a server-assigned identifier.
    ///
    /// # Errors
    /// - Returns [`ActionValidationError::BlankId`] when `raw` is empty or
    ///   whitespace only.
    pub fn new(raw: impl Into<String>) -> Result<Self, ActionValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ActionValidationError::BlankId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign applied to an action's magnitude.
///
/// Serialized into request payloads with the single-letter wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "P")]
    Positive,
    #[serde(rename = "N")]
    Negative,
}

impl Category {
    /// Parses the wire code (`P` or `N`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "P" => Some(Self::Positive),
            "N" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Positive => "P",
            Self::Negative => "N",
        }
    }

    /// `+1.0` for positive actions, `-1.0` for negative ones.
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Point in time at which an action happened.
///
/// The remote API is not strict about timestamp shape, so values that fail
/// to parse are kept verbatim instead of being rejected.
///
/// Ordering (derived, variant order first):
/// - every `Parsed` value sorts before every `Unparsed` value;
/// - `Parsed` values compare chronologically;
/// - `Unparsed` values compare by raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OccurredAt {
    Parsed(DateTime<Utc>),
    Unparsed(String),
}

impl OccurredAt {
    /// Parses RFC 3339 text, falling back to naive ISO-8601 read as UTC.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Parsed(instant.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::Parsed(naive.and_utc());
            }
        }
        Self::Unparsed(raw.to_string())
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(instant) => Some(*instant),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for OccurredAt {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Parsed(value)
    }
}

impl Display for OccurredAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsed(instant) => write!(f, "{}", instant.to_rfc3339()),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// One logged positive or negative behavior event.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub id: ActionId,
    pub category: Category,
    /// Nominally `1..=10`; `0` when the server sent no usable weight.
    pub magnitude: f64,
    pub duration_minutes: f64,
    pub note: String,
    /// Free-form mood text, usually only present on negative actions.
    pub mood: Option<String>,
    pub occurred_at: OccurredAt,
    /// Server-computed contribution. Informational only.
    pub score_delta: Option<f64>,
}

impl Action {
    /// Creates an action with empty note/mood and no server delta.
    pub fn new(
        id: ActionId,
        category: Category,
        magnitude: f64,
        occurred_at: impl Into<OccurredAt>,
    ) -> Self {
        Self {
            id,
            category,
            magnitude,
            duration_minutes: 0.0,
            note: String::new(),
            mood: None,
            occurred_at: occurred_at.into(),
            score_delta: None,
        }
    }

    /// Signed contribution of this action to the cumulative score.
    pub fn signed_magnitude(&self) -> f64 {
        self.magnitude * self.category.sign()
    }
}

/// Validation error for action construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionValidationError {
    BlankId,
}

impl Display for ActionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "action id must not be blank"),
        }
    }
}

impl Error for ActionValidationError {}
