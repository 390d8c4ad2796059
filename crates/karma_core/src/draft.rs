//! Record/edit form input and the payload sent to the remote API.
//!
//! # Responsibility
//! - Normalize user-entered drafts into valid submissions.
//! - Preview the score delta the server will assign.
//!
//! # Invariants
//! - Submitted weight is always within `1..=10`.
//! - Submitted duration is never negative.
//! - Mood is only submitted for negative actions.

use crate::model::action::{Action, Category};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_WEIGHT: i64 = 1;
pub const MAX_WEIGHT: i64 = 10;
pub const DEFAULT_WEIGHT: i64 = 5;
pub const DEFAULT_TIME_MINUTES: i64 = 30;
/// Mood preselected when editing a negative action that has none.
pub const DEFAULT_NEGATIVE_MOOD: &str = "Neutral";

const NEGATIVE_MOOD_PENALTY: f64 = 1.5;
const POSITIVE_MOOD_PENALTY: f64 = 0.5;

/// Unvalidated form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDraft {
    pub category: Category,
    pub description: String,
    pub weight: i64,
    pub time_minutes: i64,
    pub emotion: Option<String>,
}

impl Default for ActionDraft {
    fn default() -> Self {
        Self {
            category: Category::Positive,
            description: String::new(),
            weight: DEFAULT_WEIGHT,
            time_minutes: DEFAULT_TIME_MINUTES,
            emotion: None,
        }
    }
}

/// Normalized create/update payload, serialized with wire field names.
///
/// The create request carries `user_id` in its body; the update request
/// addresses the user through its URL and omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "action_type")]
    pub category: Category,
    pub description: String,
    pub weight: i64,
    pub time_minutes: i64,
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    EmptyDescription,
    BlankUserId,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "action description must not be empty"),
            Self::BlankUserId => write!(f, "user id must not be blank"),
        }
    }
}

impl Error for DraftError {}

impl ActionDraft {
    /// Prefills an edit form from a fetched action.
    ///
    /// Fractional magnitudes/durations are rounded to the nearest integer.
    pub fn from_action(action: &Action) -> Self {
        let emotion = match (&action.mood, action.category) {
            (Some(mood), _) => Some(mood.clone()),
            (None, Category::Negative) => Some(DEFAULT_NEGATIVE_MOOD.to_string()),
            (None, Category::Positive) => None,
        };
        Self {
            category: action.category,
            description: action.note.clone(),
            weight: action.magnitude.round() as i64,
            time_minutes: action.duration_minutes.round() as i64,
            emotion,
        }
    }

    /// Validates and clamps this draft into an update submission.
    ///
    /// # Errors
    /// - Returns [`DraftError::EmptyDescription`] for a blank description.
    pub fn normalize(&self) -> Result<ActionSubmission, DraftError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::EmptyDescription);
        }
        Ok(self.clamped(description.to_string()))
    }

    /// Score delta this draft would get, without requiring a description.
    pub fn preview_delta(&self) -> f64 {
        estimate_score_delta(&self.clamped(String::new()))
    }

    fn clamped(&self, description: String) -> ActionSubmission {
        let emotion = match self.category {
            Category::Negative => self
                .emotion
                .as_deref()
                .map(str::trim)
                .filter(|mood| !mood.is_empty())
                .map(str::to_string),
            Category::Positive => None,
        };

        ActionSubmission {
            user_id: None,
            category: self.category,
            description,
            weight: self.weight.clamp(MIN_WEIGHT, MAX_WEIGHT),
            time_minutes: self.time_minutes.max(0),
            emotion,
        }
    }
}

impl ActionSubmission {
    /// Turns this submission into a create payload owned by `user_id`.
    ///
    /// # Errors
    /// - Returns [`DraftError::BlankUserId`] for a blank user id.
    pub fn for_user(self, user_id: &str) -> Result<Self, DraftError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(DraftError::BlankUserId);
        }
        Ok(Self {
            user_id: Some(user_id.to_string()),
            ..self
        })
    }
}

/// Score delta the server assigns to `submission`, rounded to cents.
///
/// `weight * hours * 10`, negated for negative actions and scaled by mood:
/// `Negative` x1.5, `Positive` x0.5, anything else x1.
pub fn estimate_score_delta(submission: &ActionSubmission) -> f64 {
    let base = submission.weight as f64 * (submission.time_minutes as f64 / 60.0) * 10.0;
    match submission.category {
        Category::Positive => round_cents(base),
        Category::Negative => {
            let penalty = match submission.emotion.as_deref() {
                Some("Negative") => NEGATIVE_MOOD_PENALTY,
                Some("Positive") => POSITIVE_MOOD_PENALTY,
                _ => 1.0,
            };
            round_cents(-base * penalty)
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
