//! Cumulative score series derivation.
//!
//! # Responsibility
//! - Turn an unordered action snapshot into a chronological running total.
//! - Summarize a series for headline display (total, mean, extremes).
//!
//! # Invariants
//! - Output length equals input length.
//! - Ordering is a stable sort by `occurred_at`; ties keep input order.
//! - `cumulative_score[i] = cumulative_score[i - 1] + delta[i]`, seeded at 0.
//! - Pure and idempotent: no state is retained between calls.

use crate::model::action::{Action, ActionId, Category, OccurredAt};

/// One step of the cumulative score timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorePoint {
    pub action_id: ActionId,
    pub occurred_at: OccurredAt,
    pub cumulative_score: f64,
    /// Signed magnitude contributed by this action.
    pub delta: f64,
    pub category: Category,
}

/// Headline statistics over a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    /// Score after the most recent action; this is the displayed total.
    pub latest: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Builds the chronological cumulative score series for `actions`.
///
/// Returns an empty series for an empty snapshot. Callers must treat that as
/// "no history", which is different from a computed total of `0`.
pub fn build_series(actions: &[Action]) -> Vec<ScorePoint> {
    let mut ordered = actions.iter().collect::<Vec<_>>();
    // `sort_by` is stable.
    ordered.sort_by(|left, right| left.occurred_at.cmp(&right.occurred_at));

    let mut running = 0.0_f64;
    ordered
        .into_iter()
        .map(|action| {
            let delta = action.signed_magnitude();
            running += delta;
            ScorePoint {
                action_id: action.id.clone(),
                occurred_at: action.occurred_at.clone(),
                cumulative_score: running,
                delta,
                category: action.category,
            }
        })
        .collect()
}

/// Summarizes a series, or returns `None` when there is no history.
pub fn summarize(series: &[ScorePoint]) -> Option<SeriesSummary> {
    let last = series.last()?;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0_f64;
    for point in series {
        min = min.min(point.cumulative_score);
        max = max.max(point.cumulative_score);
        sum += point.cumulative_score;
    }

    Some(SeriesSummary {
        count: series.len(),
        latest: last.cumulative_score,
        min,
        max,
        mean: sum / series.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::{build_series, summarize};
    use crate::model::action::{Action, ActionId, Category, OccurredAt};

    fn action(id: &str, category: Category, magnitude: f64, at: &str) -> Action {
        Action::new(
            ActionId::new(id).unwrap(),
            category,
            magnitude,
            OccurredAt::parse(at),
        )
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let actions = vec![
            action("b", Category::Positive, 2.0, "2025-01-01T00:00:00Z"),
            action("a", Category::Negative, 1.0, "2025-01-01T00:00:00Z"),
        ];

        let series = build_series(&actions);
        assert_eq!(series[0].action_id.as_str(), "b");
        assert_eq!(series[1].action_id.as_str(), "a");
        assert_eq!(series[1].cumulative_score, 1.0);
    }

    #[test]
    fn zero_magnitude_is_a_no_op_step() {
        let actions = vec![
            action("a", Category::Positive, 4.0, "2025-01-01T00:00:00Z"),
            action("b", Category::Negative, 0.0, "2025-01-02T00:00:00Z"),
        ];

        let series = build_series(&actions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].cumulative_score, 4.0);
    }

    #[test]
    fn summarize_distinguishes_no_history_from_zero_total() {
        assert!(summarize(&[]).is_none());

        let actions = vec![
            action("a", Category::Positive, 3.0, "2025-01-01T00:00:00Z"),
            action("b", Category::Negative, 3.0, "2025-01-02T00:00:00Z"),
        ];
        let summary = summarize(&build_series(&actions)).expect("history exists");
        assert_eq!(summary.latest, 0.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, 1.5);
    }
}
