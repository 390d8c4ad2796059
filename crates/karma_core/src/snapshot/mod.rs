//! Decoding of action snapshots supplied by the data-fetch collaborator.
//!
//! # Responsibility
//! - Turn remote API response bodies into typed domain values.
//! - Report data-quality problems as typed errors.
//!
//! # Invariants
//! - Decoding never invents identity for records that lack one.

use crate::model::action::ActionId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod wire;

pub use wire::{
    decode_action_list, decode_records, decode_total_score, read_snapshot_file, ActionRecord,
};

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot decoding error.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Envelope reported a non-success status.
    Rejected {
        status: String,
        message: Option<String>,
    },
    MissingField(&'static str),
    /// Record at `index` has no usable server-assigned id.
    MissingId {
        index: usize,
    },
    DuplicateId(ActionId),
    UnknownCategory {
        id: ActionId,
        value: String,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid snapshot JSON: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read snapshot `{}`: {source}", path.display())
            }
            Self::Rejected { status, message } => match message {
                Some(message) => write!(f, "snapshot rejected with status `{status}`: {message}"),
                None => write!(f, "snapshot rejected with status `{status}`"),
            },
            Self::MissingField(field) => write!(f, "snapshot is missing `{field}`"),
            Self::MissingId { index } => write!(f, "action at index {index} has no id"),
            Self::DuplicateId(id) => write!(f, "duplicate action id: {id}"),
            Self::UnknownCategory { id, value } => {
                write!(f, "action {id} has unknown action_type `{value}`")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Rejected { .. } => None,
            Self::MissingField(_) => None,
            Self::MissingId { .. } => None,
            Self::DuplicateId(_) => None,
            Self::UnknownCategory { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
