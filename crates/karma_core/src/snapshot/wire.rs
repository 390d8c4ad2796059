//! Wire shapes returned by the remote action API and their decoding.
//!
//! # Responsibility
//! - Deserialize action-list and total-score envelopes.
//! - Convert wire records into validated domain `Action`s.
//!
//! # Invariants
//! - Missing or blank ids are rejected; ids are never synthesized.
//! - Non-numeric `weight`/`time_minutes` decode as `0`.
//! - Unparseable timestamps are kept verbatim, not rejected.

use crate::model::action::{Action, ActionId, Category, OccurredAt};
use crate::snapshot::{SnapshotError, SnapshotResult};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

const STATUS_SUCCESS: &str = "success";

/// One action as serialized by the remote API.
///
/// Every field is optional on the wire; [`decode_records`] decides which
/// omissions are tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: Value,
    #[serde(default)]
    pub time_minutes: Value,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub score_delta: Value,
}

#[derive(Debug, Deserialize)]
struct ActionListEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    actions: Option<Vec<ActionRecord>>,
}

#[derive(Debug, Deserialize)]
struct TotalScoreEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    total_score: Value,
}

/// Decodes an action-list response body (`{status, message?, actions}`).
///
/// # Errors
/// - `Json` when the body is not a JSON object of the expected shape.
/// - `Rejected` when `status` is not `success`.
/// - `MissingField("actions")` when the action array is absent.
/// - Any record-level error from [`decode_records`].
pub fn decode_action_list(json: &str) -> SnapshotResult<Vec<Action>> {
    let envelope: ActionListEnvelope = serde_json::from_str(json)?;
    ensure_success(envelope.status, envelope.message)?;
    let records = envelope
        .actions
        .ok_or(SnapshotError::MissingField("actions"))?;
    decode_records(records)
}

/// Decodes a total-score response body (`{status, total_score}`).
pub fn decode_total_score(json: &str) -> SnapshotResult<f64> {
    let envelope: TotalScoreEnvelope = serde_json::from_str(json)?;
    ensure_success(envelope.status, envelope.message)?;
    envelope
        .total_score
        .as_f64()
        .ok_or(SnapshotError::MissingField("total_score"))
}

/// Reads and decodes an action-list response stored on disk.
pub fn read_snapshot_file(path: impl AsRef<Path>) -> SnapshotResult<Vec<Action>> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_action_list(&body)
}

/// Converts wire records into domain actions, preserving input order.
pub fn decode_records(records: Vec<ActionRecord>) -> SnapshotResult<Vec<Action>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut actions = Vec::with_capacity(records.len());
    let mut unparsed_timestamps = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let action = decode_record(index, record)?;
        if !seen.insert(action.id.clone()) {
            return Err(SnapshotError::DuplicateId(action.id));
        }
        if matches!(action.occurred_at, OccurredAt::Unparsed(_)) {
            unparsed_timestamps += 1;
        }
        actions.push(action);
    }

    if unparsed_timestamps > 0 {
        warn!(
            "event=snapshot_decode module=snapshot status=degraded unparsed_timestamps={}",
            unparsed_timestamps
        );
    }
    debug!(
        "event=snapshot_decode module=snapshot status=ok actions={}",
        actions.len()
    );
    Ok(actions)
}

fn decode_record(index: usize, record: ActionRecord) -> SnapshotResult<Action> {
    let id = record
        .id
        .and_then(|raw| ActionId::new(raw).ok())
        .ok_or(SnapshotError::MissingId { index })?;

    let code = record.action_type.unwrap_or_default();
    let category = Category::from_code(&code).ok_or_else(|| SnapshotError::UnknownCategory {
        id: id.clone(),
        value: code.clone(),
    })?;

    Ok(Action {
        id,
        category,
        magnitude: lenient_number(&record.weight),
        duration_minutes: lenient_number(&record.time_minutes),
        note: record.description.unwrap_or_default(),
        mood: record.emotion.filter(|mood| !mood.trim().is_empty()),
        occurred_at: OccurredAt::parse(record.timestamp.as_deref().unwrap_or_default()),
        score_delta: record.score_delta.as_f64(),
    })
}

fn ensure_success(status: Option<String>, message: Option<String>) -> SnapshotResult<()> {
    match status {
        Some(status) if status == STATUS_SUCCESS => Ok(()),
        other => Err(SnapshotError::Rejected {
            status: other.unwrap_or_default(),
            message,
        }),
    }
}

/// Finite JSON numbers pass through; everything else becomes `0`.
fn lenient_number(value: &Value) -> f64 {
    value
        .as_f64()
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}
