//! Action source contracts and snapshot-backed implementations.
//!
//! # Responsibility
//! - Abstract where an action snapshot comes from.
//! - Provide JSON-envelope sources for FFI payloads and files.
//!
//! # Invariants
//! - Each `fetch_actions` call returns a complete, independent snapshot.

use crate::model::action::Action;
use crate::snapshot::{decode_action_list, read_snapshot_file, SnapshotError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug)]
pub enum SourceError {
    Snapshot(SnapshotError),
    /// Host-side collaborator failed (network, auth, ...).
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "action source unavailable: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<SnapshotError> for SourceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Supplier of the full action history for one user.
pub trait ActionSource {
    fn fetch_actions(&self) -> SourceResult<Vec<Action>>;
}

/// Source backed by an in-memory action-list response body.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    body: String,
}

impl JsonSnapshotSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl ActionSource for JsonSnapshotSource {
    fn fetch_actions(&self) -> SourceResult<Vec<Action>> {
        Ok(decode_action_list(&self.body)?)
    }
}

/// Source that re-reads an action-list response file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActionSource for FileSnapshotSource {
    fn fetch_actions(&self) -> SourceResult<Vec<Action>> {
        Ok(read_snapshot_file(&self.path)?)
    }
}

/// Already-decoded actions, e.g. handed over by a host that did its own fetch.
impl ActionSource for Vec<Action> {
    fn fetch_actions(&self) -> SourceResult<Vec<Action>> {
        Ok(self.clone())
    }
}
