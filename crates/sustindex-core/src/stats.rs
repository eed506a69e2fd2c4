//! Aggregations for the dashboard and history pages.
//!
//! Nothing here computes a score: counts, filters and the arithmetic mean of
//! `total_score` values the backend already produced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::attempt::Attempt;

/// How many completed attempts the dashboard lists.
pub const RECENT_LIMIT: usize = 3;

pub fn completed(attempts: &[Attempt]) -> Vec<&Attempt> {
    attempts.iter().filter(|a| a.is_completed).collect()
}

pub fn in_progress(attempts: &[Attempt]) -> Vec<&Attempt> {
    attempts.iter().filter(|a| !a.is_completed).collect()
}

/// Rounded mean `total_score` of the completed attempts, `None` when there
/// are none. In-progress attempts never count.
pub fn average_score(attempts: &[Attempt]) -> Option<i64> {
    let done = completed(attempts);
    if done.is_empty() {
        return None;
    }
    let sum: f64 = done.iter().map(|a| a.total_score).sum();
    Some((sum / done.len() as f64).round() as i64)
}

/// Rounds a backend score for display.
pub fn rounded(score: f64) -> i64 {
    score.round() as i64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryFilter {
    #[default]
    All,
    Completed,
    InProgress,
}

impl HistoryFilter {
    pub fn matches(&self, attempt: &Attempt) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Completed => attempt.is_completed,
            HistoryFilter::InProgress => !attempt.is_completed,
        }
    }

    pub fn apply<'a>(&self, attempts: &'a [Attempt]) -> Vec<&'a Attempt> {
        attempts.iter().filter(|a| self.matches(a)).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryFilter::All => "all",
            HistoryFilter::Completed => "completed",
            HistoryFilter::InProgress => "in-progress",
        }
    }

    /// Message shown when the filter leaves nothing to list.
    pub fn empty_message(&self) -> String {
        match self {
            HistoryFilter::All => "No assessments yet".to_string(),
            other => format!("No {} assessments found", other.as_str()),
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "completed" => Ok(HistoryFilter::Completed),
            "in-progress" | "in_progress" | "inprogress" => Ok(HistoryFilter::InProgress),
            other => Err(CoreError::UnknownFilter(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub average_score: Option<i64>,
    /// Most recent completed attempts, in the order the backend returned them.
    pub recent: Vec<Attempt>,
}

impl DashboardSummary {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        let done = completed(attempts);
        Self {
            completed_count: done.len(),
            in_progress_count: attempts.len() - done.len(),
            average_score: average_score(attempts),
            recent: done.into_iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    /// The dashboard shows a dash instead of a zero average.
    pub fn average_label(&self) -> String {
        match self.average_score {
            Some(avg) if avg > 0 => avg.to_string(),
            _ => "-".to_string(),
        }
    }

    pub fn latest(&self) -> Option<&Attempt> {
        self.recent.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_score: Option<i64>,
}

impl HistorySummary {
    pub fn from_attempts(attempts: &[Attempt]) -> Self {
        let done = completed(attempts).len();
        Self {
            total: attempts.len(),
            completed: done,
            in_progress: attempts.len() - done,
            average_score: average_score(attempts),
        }
    }

    pub fn count_for(&self, filter: HistoryFilter) -> usize {
        match filter {
            HistoryFilter::All => self.total,
            HistoryFilter::Completed => self.completed,
            HistoryFilter::InProgress => self.in_progress,
        }
    }
}
