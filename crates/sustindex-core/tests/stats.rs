use sustindex_core::ids::AttemptId;
use sustindex_core::models::attempt::Attempt;
use sustindex_core::stats::{self, DashboardSummary, HistoryFilter, HistorySummary};

fn attempt(id: i64, completed: bool, total: f64) -> Attempt {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "survey_name": "ESG Baseline",
        "is_completed": completed,
        "total_score": total,
        "overall_grade": if completed { "A" } else { "" },
    }))
    .unwrap()
}

#[test]
fn dashboard_average_is_rounded_mean_of_completed() {
    let attempts = vec![
        attempt(1, true, 80.0),
        attempt(2, true, 90.0),
        attempt(3, true, 70.0),
    ];
    let summary = DashboardSummary::from_attempts(&attempts);
    assert_eq!(summary.average_score, Some(80));
    assert_eq!(summary.average_label(), "80");
    assert_eq!(summary.completed_count, 3);
}

#[test]
fn in_progress_attempts_are_excluded_from_average() {
    let attempts = vec![
        attempt(1, true, 60.0),
        attempt(2, false, 0.0),
        attempt(3, true, 75.0),
    ];
    assert_eq!(stats::average_score(&attempts), Some(68));

    let history = HistorySummary::from_attempts(&attempts);
    assert_eq!(history.total, 3);
    assert_eq!(history.completed, 2);
    assert_eq!(history.in_progress, 1);
}

#[test]
fn incomplete_attempt_is_classified_in_progress() {
    let attempts = vec![attempt(7, false, 0.0)];
    let in_progress = HistoryFilter::InProgress.apply(&attempts);
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].id, AttemptId(7));
    assert!(HistoryFilter::Completed.apply(&attempts).is_empty());
    assert_eq!(stats::average_score(&attempts), None);
}

#[test]
fn no_completed_attempts_shows_dash() {
    let summary = DashboardSummary::from_attempts(&[attempt(1, false, 0.0)]);
    assert_eq!(summary.average_label(), "-");
    assert!(summary.latest().is_none());
}

#[test]
fn dashboard_lists_at_most_three_recent() {
    let attempts: Vec<_> = (1..=5).map(|i| attempt(i, true, 50.0)).collect();
    let summary = DashboardSummary::from_attempts(&attempts);
    let ids: Vec<_> = summary.recent.iter().map(|a| a.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn history_filter_parses_and_reports_empty_state() {
    assert_eq!("in-progress".parse::<HistoryFilter>().unwrap(), HistoryFilter::InProgress);
    assert_eq!("Completed".parse::<HistoryFilter>().unwrap(), HistoryFilter::Completed);
    assert!("pending".parse::<HistoryFilter>().is_err());
    assert_eq!(HistoryFilter::All.empty_message(), "No assessments yet");
    assert_eq!(
        HistoryFilter::InProgress.empty_message(),
        "No in-progress assessments found"
    );
}
