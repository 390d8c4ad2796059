use karma_core::{
    Action, ActionDraft, ActionId, ActionSource, Category, ChartConfig, ChartService,
    FileSnapshotSource, JsonSnapshotSource, OccurredAt, ScoreTone, ServiceError, SourceError,
    SourceResult,
};
use std::io::Write;

const SNAPSHOT: &str = r#"{
    "status": "success",
    "actions": [
        {"id": "3", "action_type": "P", "weight": 10, "timestamp": "2025-03-03T09:00:00Z"},
        {"id": "1", "action_type": "P", "weight": 5, "timestamp": "2025-03-01T09:00:00Z"},
        {"id": "2", "action_type": "N", "weight": 3, "timestamp": "2025-03-02T09:00:00Z"}
    ]
}"#;

struct FailingSource;

impl ActionSource for FailingSource {
    fn fetch_actions(&self) -> SourceResult<Vec<Action>> {
        Err(SourceError::Unavailable("offline".to_string()))
    }
}

#[test]
fn refresh_derives_series_plot_and_labels() {
    let service = ChartService::new(JsonSnapshotSource::new(SNAPSHOT));
    let chart = service.refresh(380.0).unwrap();

    assert!(chart.has_history());
    let scores = chart
        .series
        .iter()
        .map(|point| point.cumulative_score)
        .collect::<Vec<_>>();
    assert_eq!(scores, vec![5.0, 2.0, 12.0]);

    let headline = chart.headline.as_ref().unwrap();
    assert_eq!(headline.total_score, 12.0);
    assert_eq!(headline.total_text, "12.00");
    assert_eq!(headline.tone, ScoreTone::Positive);
    assert_eq!(headline.mean_text, "6.3");

    assert_eq!(chart.plot.layout.canvas_width, 340.0);
    assert_eq!(chart.plot.points.len(), 3);
    assert_eq!(chart.segments.len(), 2);
    let labels = chart
        .date_labels
        .iter()
        .map(|label| label.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["3/1", "3/2", "3/3"]);
}

#[test]
fn refresh_with_empty_snapshot_has_no_history() {
    let empty = JsonSnapshotSource::new(r#"{"status":"success","actions":[]}"#);
    let service = ChartService::new(empty);
    let chart = service.refresh(380.0).unwrap();

    assert!(!chart.has_history());
    assert!(chart.headline.is_none());
    assert!(chart.plot.points.is_empty());
    assert!(chart.date_labels.is_empty());
}

#[test]
fn refresh_surfaces_source_errors() {
    let service = ChartService::new(FailingSource);
    let err = service.refresh(380.0).unwrap_err();
    assert!(matches!(err, ServiceError::Source(SourceError::Unavailable(_))));
    assert!(err.to_string().contains("offline"));
}

#[test]
fn refresh_rereads_the_snapshot_file_each_time() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file.flush().unwrap();

    let service = ChartService::new(FileSnapshotSource::new(file.path()));
    assert_eq!(service.refresh(380.0).unwrap().series.len(), 3);

    std::fs::write(file.path(), r#"{"status":"success","actions":[]}"#).unwrap();
    assert!(!service.refresh(380.0).unwrap().has_history());
}

#[test]
fn config_controls_canvas_and_label_count() {
    let config = ChartConfig::from_json_str(r#"{"canvas_height": 120, "label_count": 2}"#).unwrap();
    let service = ChartService::with_config(JsonSnapshotSource::new(SNAPSHOT), config);
    let chart = service.refresh(380.0).unwrap();

    assert_eq!(chart.plot.layout.canvas_height, 120.0);
    assert_eq!(chart.date_labels.len(), 2);
    assert_eq!(chart.date_labels[0].text, "3/2");
}

#[test]
fn unbounded_screen_width_yields_finite_geometry() {
    let service = ChartService::new(JsonSnapshotSource::new(SNAPSHOT));
    let chart = service.refresh(f64::INFINITY).unwrap();

    assert_eq!(chart.plot.layout.canvas_width, 0.0);
    assert!(chart
        .plot
        .points
        .iter()
        .all(|point| point.x.is_finite() && point.y.is_finite()));
    assert!(chart
        .segments
        .iter()
        .all(|segment| segment.length.is_finite() && segment.angle_radians.is_finite()));
}

#[test]
fn decoded_actions_work_as_an_in_memory_source() {
    let actions = vec![Action::new(
        ActionId::new("only").unwrap(),
        Category::Negative,
        60.0,
        OccurredAt::parse("2025-03-01T09:00:00Z"),
    )];
    let chart = ChartService::new(actions).refresh(380.0).unwrap();
    let headline = chart.headline.unwrap();
    assert_eq!(headline.tone, ScoreTone::StrongNegative);
    assert_eq!(headline.total_text, "-60.00");
}

#[test]
fn edit_prefill_defaults_negative_mood() {
    let mut action = Action::new(
        ActionId::new("n").unwrap(),
        Category::Negative,
        4.0,
        OccurredAt::parse("2025-03-01T09:00:00Z"),
    );
    action.note = "snacks".to_string();
    action.duration_minutes = 15.0;

    let draft = ActionDraft::from_action(&action);
    assert_eq!(draft.emotion.as_deref(), Some("Neutral"));
    assert_eq!(draft.weight, 4);
    assert_eq!(draft.time_minutes, 15);
    assert_eq!(draft.description, "snacks");

    let positive = Action::new(
        ActionId::new("p").unwrap(),
        Category::Positive,
        4.0,
        OccurredAt::parse("2025-03-01T09:00:00Z"),
    );
    assert_eq!(ActionDraft::from_action(&positive).emotion, None);
}
