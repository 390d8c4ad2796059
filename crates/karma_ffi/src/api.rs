//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core chart types into plain view structs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok` + `message`, never by throwing.

use karma_core::{
    chart_from_actions, core_version as core_version_inner, decode_action_list,
    estimate_score_delta, init_logging as init_logging_inner, ping as ping_inner, ActionDraft,
    Category, ChartConfig, KarmaChart, ReferenceLine,
};
use log::warn;
use std::sync::OnceLock;

const CHART_CONFIG_ENV: &str = "KARMA_CHART_CONFIG";
static CHART_CONFIG: OnceLock<ChartConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One plotted vertex with its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPointView {
    pub action_id: String,
    pub timestamp: String,
    pub x: f64,
    pub y: f64,
    pub score: f64,
    pub delta: f64,
    pub score_label: String,
    /// Cumulative score is `>= 0`; selects the vertex color.
    pub above_zero: bool,
    /// The action at this vertex is a `P` action.
    pub positive_action: bool,
}

/// Horizontal reference line; skip drawing when `visible` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLineView {
    pub y: f64,
    pub visible: bool,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateLabelView {
    pub text: String,
    pub x: f64,
    pub width: f64,
}

/// Line between consecutive points, drawn as a rotated bar from its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub angle_radians: f64,
}

/// Chart response envelope for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartResponse {
    pub ok: bool,
    pub message: String,
    /// False when the snapshot is empty; distinct from a total of 0.
    pub has_history: bool,
    pub total_score: Option<f64>,
    pub total_text: String,
    /// `strong_positive|positive|negative|strong_negative`, empty without history.
    pub tone: String,
    pub mean_text: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub points: Vec<ChartPointView>,
    pub zero_line: ReferenceLineView,
    pub mean_line: ReferenceLineView,
    pub date_labels: Vec<DateLabelView>,
    pub segments: Vec<SegmentView>,
}

impl ChartResponse {
    fn failure(message: impl Into<String>) -> Self {
        let hidden = ReferenceLineView {
            y: 0.0,
            visible: false,
            score: 0.0,
        };
        Self {
            ok: false,
            message: message.into(),
            has_history: false,
            total_score: None,
            total_text: String::new(),
            tone: String::new(),
            mean_text: String::new(),
            canvas_width: 0.0,
            canvas_height: 0.0,
            points: Vec::new(),
            zero_line: hidden.clone(),
            mean_line: hidden,
            date_labels: Vec::new(),
            segments: Vec::new(),
        }
    }
}

/// Normalized draft envelope for record/edit submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftResponse {
    pub ok: bool,
    /// JSON body for the create request (with `user_id`) or the update
    /// request (without it); `None` for previews.
    pub payload_json: Option<String>,
    /// Score delta the server is expected to assign.
    pub estimated_delta: Option<f64>,
    pub message: String,
}

impl DraftResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload_json: None,
            estimated_delta: None,
            message: message.into(),
        }
    }
}

/// Derives the score chart from an action-list response body.
///
/// # FFI contract
/// - Sync call, CPU-only, no I/O beyond a one-time config read.
/// - `screen_width` is the host window width in logical pixels.
/// - Never panics; decoding errors return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn karma_chart(snapshot_json: String, screen_width: f64) -> ChartResponse {
    let actions = match decode_action_list(&snapshot_json) {
        Ok(actions) => actions,
        Err(err) => return ChartResponse::failure(format!("karma_chart failed: {err}")),
    };

    let chart = chart_from_actions(&actions, resolve_chart_config(), screen_width);
    to_chart_response(chart)
}

/// Validates record/edit form input and builds the request payload.
///
/// Input semantics:
/// - `action_type`: `P` or `N`.
/// - `user_id`: set when recording a new action, `None` when editing one.
///
/// # FFI contract
/// - Sync call, CPU-only.
/// - Never panics; validation errors return `ok=false` with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn normalize_action_draft(
    user_id: Option<String>,
    action_type: String,
    description: String,
    weight: i64,
    time_minutes: i64,
    emotion: Option<String>,
) -> DraftResponse {
    let Some(category) = Category::from_code(&action_type) else {
        return DraftResponse::failure(format!(
            "normalize_action_draft failed: unknown action_type `{action_type}`"
        ));
    };
    let draft = ActionDraft {
        category,
        description,
        weight,
        time_minutes,
        emotion,
    };

    let normalized = draft.normalize().and_then(|submission| match user_id.as_deref() {
        Some(user_id) => submission.for_user(user_id),
        None => Ok(submission),
    });
    let submission = match normalized {
        Ok(submission) => submission,
        Err(err) => return DraftResponse::failure(format!("normalize_action_draft failed: {err}")),
    };
    match serde_json::to_string(&submission) {
        Ok(payload) => DraftResponse {
            ok: true,
            payload_json: Some(payload),
            estimated_delta: Some(estimate_score_delta(&submission)),
            message: "Draft ready.".to_string(),
        },
        Err(err) => DraftResponse::failure(format!("normalize_action_draft failed: {err}")),
    }
}

/// Previews the score delta of the current form values.
///
/// Uses the same clamping as [`normalize_action_draft`] but needs no
/// description, so it can run on every form change.
///
/// # FFI contract
/// - Sync call, CPU-only.
/// - Never panics; an unknown `action_type` returns `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn preview_score_delta(
    action_type: String,
    weight: i64,
    time_minutes: i64,
    emotion: Option<String>,
) -> DraftResponse {
    let Some(category) = Category::from_code(&action_type) else {
        return DraftResponse::failure(format!(
            "preview_score_delta failed: unknown action_type `{action_type}`"
        ));
    };
    let draft = ActionDraft {
        category,
        weight,
        time_minutes,
        emotion,
        ..ActionDraft::default()
    };
    DraftResponse {
        ok: true,
        payload_json: None,
        estimated_delta: Some(draft.preview_delta()),
        message: "Preview ready.".to_string(),
    }
}

fn resolve_chart_config() -> &'static ChartConfig {
    CHART_CONFIG.get_or_init(|| {
        let Ok(raw) = std::env::var(CHART_CONFIG_ENV) else {
            return ChartConfig::default();
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ChartConfig::default();
        }
        match ChartConfig::from_path(trimmed) {
            Ok(config) => config,
            Err(err) => {
                warn!("event=config_load module=ffi status=fallback error={err}");
                ChartConfig::default()
            }
        }
    })
}

fn to_chart_response(chart: KarmaChart) -> ChartResponse {
    let points = chart
        .series
        .iter()
        .zip(&chart.plot.points)
        .map(|(point, plotted)| ChartPointView {
            action_id: point.action_id.to_string(),
            timestamp: point.occurred_at.to_string(),
            x: plotted.x,
            y: plotted.y,
            score: plotted.cumulative_score,
            delta: point.delta,
            score_label: karma_core::chart::score_label(plotted.cumulative_score),
            above_zero: plotted.cumulative_score >= 0.0,
            positive_action: point.category == Category::Positive,
        })
        .collect::<Vec<_>>();

    let (total_score, total_text, tone, mean_text) = match &chart.headline {
        Some(headline) => (
            Some(headline.total_score),
            headline.total_text.clone(),
            headline.tone.as_str().to_string(),
            headline.mean_text.clone(),
        ),
        None => (None, String::new(), String::new(), String::new()),
    };
    let message = if chart.has_history() {
        format!("Charted {} action(s).", points.len())
    } else {
        "No history.".to_string()
    };

    ChartResponse {
        ok: true,
        message,
        has_history: chart.has_history(),
        total_score,
        total_text,
        tone,
        mean_text,
        canvas_width: chart.plot.layout.canvas_width,
        canvas_height: chart.plot.layout.canvas_height,
        points,
        zero_line: to_reference_line_view(&chart.plot.zero_y),
        mean_line: to_reference_line_view(&chart.plot.mean_y),
        date_labels: chart
            .date_labels
            .into_iter()
            .map(|label| DateLabelView {
                text: label.text,
                x: label.x,
                width: label.width,
            })
            .collect(),
        segments: chart
            .segments
            .into_iter()
            .map(|segment| SegmentView {
                x: segment.origin_x,
                y: segment.origin_y,
                length: segment.length,
                angle_radians: segment.angle_radians,
            })
            .collect(),
    }
}

fn to_reference_line_view(line: &ReferenceLine) -> ReferenceLineView {
    ReferenceLineView {
        y: line.y,
        visible: line.in_bounds,
        score: line.score,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, karma_chart, normalize_action_draft, ping, preview_score_delta,
    };

    const SNAPSHOT: &str = r#"{
        "status": "success",
        "actions": [
            {"id": "b", "action_type": "N", "weight": 3, "timestamp": "2025-05-02T08:00:00"},
            {"id": "a", "action_type": "P", "weight": 5, "timestamp": "2025-05-01T08:00:00"}
        ]
    }"#;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn karma_chart_orders_points_and_reports_total() {
        let response = karma_chart(SNAPSHOT.to_string(), 390.0);
        assert!(response.ok, "{}", response.message);
        assert!(response.has_history);
        assert_eq!(response.total_score, Some(2.0));
        assert_eq!(response.total_text, "2.00");
        assert_eq!(response.tone, "positive");

        let ids = response
            .points
            .iter()
            .map(|point| point.action_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(response.points[0].score_label, "5");
        assert!(response.points[0].positive_action);
        assert!(!response.points[1].positive_action);
        assert!(response.points[1].above_zero);
        assert_eq!(response.segments.len(), 1);
        assert_eq!(response.date_labels[0].text, "5/1");
    }

    #[test]
    fn karma_chart_reports_empty_history() {
        let response = karma_chart(r#"{"status":"success","actions":[]}"#.to_string(), 390.0);
        assert!(response.ok);
        assert!(!response.has_history);
        assert_eq!(response.total_score, None);
        assert!(response.points.is_empty());
        assert!(!response.zero_line.visible);
    }

    #[test]
    fn karma_chart_rejects_records_without_id() {
        let response = karma_chart(
            r#"{"status":"success","actions":[{"action_type":"P","weight":1}]}"#.to_string(),
            390.0,
        );
        assert!(!response.ok);
        assert!(response.message.contains("no id"));
    }

    #[test]
    fn karma_chart_colors_points_by_score_sign() {
        let snapshot = r#"{"status":"success","actions":[
            {"id": "a", "action_type": "N", "weight": 4, "timestamp": "2025-05-01T08:00:00"},
            {"id": "b", "action_type": "P", "weight": 1, "timestamp": "2025-05-02T08:00:00"}
        ]}"#;
        let response = karma_chart(snapshot.to_string(), 390.0);
        assert!(response.ok, "{}", response.message);

        let last = &response.points[1];
        assert_eq!(last.score, -3.0);
        assert!(last.positive_action);
        assert!(!last.above_zero);
    }

    #[test]
    fn karma_chart_tolerates_non_finite_screen_width() {
        let response = karma_chart(SNAPSHOT.to_string(), f64::NAN);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.canvas_width, 0.0);
        assert!(response.points.iter().all(|point| point.x.is_finite()));
    }

    #[test]
    fn normalize_action_draft_builds_wire_payload() {
        let response = normalize_action_draft(
            None,
            "N".to_string(),
            "  doomscrolling ".to_string(),
            12,
            60,
            Some("Negative".to_string()),
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.estimated_delta, Some(-150.0));

        let payload: serde_json::Value =
            serde_json::from_str(response.payload_json.as_deref().unwrap()).unwrap();
        assert_eq!(payload["action_type"], "N");
        assert_eq!(payload["description"], "doomscrolling");
        assert_eq!(payload["weight"], 10);
        assert_eq!(payload["emotion"], "Negative");
        assert!(payload.get("user_id").is_none());
    }

    #[test]
    fn normalize_action_draft_adds_user_id_for_new_records() {
        let response = normalize_action_draft(
            Some("uid-1".to_string()),
            "P".to_string(),
            "walk".to_string(),
            5,
            30,
            None,
        );
        assert!(response.ok, "{}", response.message);
        let payload: serde_json::Value =
            serde_json::from_str(response.payload_json.as_deref().unwrap()).unwrap();
        assert_eq!(payload["user_id"], "uid-1");
        assert_eq!(payload["action_type"], "P");

        let blank = normalize_action_draft(
            Some(" ".to_string()),
            "P".to_string(),
            "walk".to_string(),
            5,
            30,
            None,
        );
        assert!(!blank.ok);
        assert!(blank.message.contains("user id"));
    }

    #[test]
    fn preview_score_delta_needs_no_description() {
        let response = preview_score_delta("N".to_string(), 6, 30, Some("Positive".to_string()));
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.estimated_delta, Some(-15.0));
        assert_eq!(response.payload_json, None);

        let clamped = preview_score_delta("P".to_string(), 0, -5, None);
        assert_eq!(clamped.estimated_delta, Some(0.0));

        assert!(!preview_score_delta("Z".to_string(), 5, 30, None).ok);
    }

    #[test]
    fn normalize_action_draft_rejects_unknown_type() {
        let response =
            normalize_action_draft(None, "X".to_string(), "walk".to_string(), 5, 30, None);
        assert!(!response.ok);
        assert!(response.message.contains("action_type"));
    }
}
