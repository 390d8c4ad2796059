use karma_core::{build_series, summarize, Action, ActionId, Category, OccurredAt};

fn action(id: &str, category: Category, magnitude: f64, at: &str) -> Action {
    Action::new(
        ActionId::new(id).unwrap(),
        category,
        magnitude,
        OccurredAt::parse(at),
    )
}

fn sample_actions() -> Vec<Action> {
    vec![
        action("c", Category::Positive, 8.0, "2025-02-03T07:00:00Z"),
        action("a", Category::Positive, 5.0, "2025-02-01T07:00:00Z"),
        action("d", Category::Negative, 10.0, "2025-02-04T07:00:00Z"),
        action("b", Category::Negative, 3.0, "2025-02-02T07:00:00Z"),
    ]
}

fn permutations(items: &[Action]) -> Vec<Vec<Action>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut all = Vec::new();
    for index in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            all.push(tail);
        }
    }
    all
}

#[test]
fn empty_snapshot_yields_empty_series() {
    assert!(build_series(&[]).is_empty());
    assert!(summarize(&[]).is_none());
}

#[test]
fn positive_then_negative_accumulates() {
    let actions = vec![
        action("n", Category::Negative, 3.0, "2025-01-02T00:00:00Z"),
        action("p", Category::Positive, 5.0, "2025-01-01T00:00:00Z"),
    ];

    let series = build_series(&actions);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].cumulative_score, 5.0);
    assert_eq!(series[0].delta, 5.0);
    assert_eq!(series[0].category, Category::Positive);
    assert_eq!(series[1].cumulative_score, 2.0);
    assert_eq!(series[1].delta, -3.0);
    assert_eq!(series[1].category, Category::Negative);
}

#[test]
fn output_is_independent_of_input_order() {
    let expected = build_series(&sample_actions());
    let scores = expected
        .iter()
        .map(|point| point.cumulative_score)
        .collect::<Vec<_>>();
    assert_eq!(scores, vec![5.0, 2.0, 10.0, 0.0]);

    for permutation in permutations(&sample_actions()) {
        assert_eq!(build_series(&permutation), expected);
    }
}

#[test]
fn repeated_builds_are_identical() {
    let actions = sample_actions();
    let first = build_series(&actions);
    let second = build_series(&actions);
    assert_eq!(first, second);
    for (left, right) in first.iter().zip(&second) {
        assert_eq!(
            left.cumulative_score.to_bits(),
            right.cumulative_score.to_bits()
        );
    }
}

#[test]
fn series_length_matches_input_and_running_total_holds() {
    let actions = sample_actions();
    let series = build_series(&actions);
    assert_eq!(series.len(), actions.len());

    let mut previous = 0.0;
    for point in &series {
        assert_eq!(point.cumulative_score, previous + point.delta);
        previous = point.cumulative_score;
    }
}

#[test]
fn unparsed_timestamps_are_placed_after_parsed_ones() {
    let actions = vec![
        action("junk", Category::Positive, 1.0, "not a date"),
        action("late", Category::Positive, 2.0, "2030-01-01T00:00:00Z"),
        action("early", Category::Negative, 4.0, "2020-01-01T00:00:00Z"),
    ];

    let ids = build_series(&actions)
        .into_iter()
        .map(|point| point.action_id.to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["early", "late", "junk"]);
}

#[test]
fn summary_reports_latest_total_and_mean() {
    let summary = summarize(&build_series(&sample_actions())).expect("non-empty");
    assert_eq!(summary.count, 4);
    assert_eq!(summary.latest, 0.0);
    assert_eq!(summary.min, 0.0);
    assert_eq!(summary.max, 10.0);
    assert_eq!(summary.mean, 4.25);
}
