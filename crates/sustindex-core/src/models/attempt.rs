use serde::{Deserialize, Serialize};

use crate::ids::{AttemptId, SurveyId, UserId};

use super::answer::AnswerSummary;
use super::null_as_default;
use super::recommendation::Recommendation;

/// One user's run through a survey. Scores and grade are computed by the
/// backend on completion and shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: AttemptId,
    #[serde(default)]
    pub user: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default)]
    pub survey: Option<SurveyId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub survey_name: String,
    #[serde(default)]
    pub started_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub completed_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub environmental_score: f64,
    #[serde(default)]
    pub social_score: f64,
    #[serde(default)]
    pub governance_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_grade: String,
    #[serde(default)]
    pub answers: Vec<AnswerSummary>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Body of `POST attempts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub survey: SurveyId,
}

/// Response of `POST attempts/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAttempt {
    #[serde(default)]
    pub id: Option<AttemptId>,
    #[serde(default)]
    pub survey: Option<SurveyId>,
}

/// Score block returned alongside the attempt by the `complete` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
    pub total: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grade: String,
}

/// Response of `POST attempts/{id}/complete/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedAttempt {
    pub attempt: Attempt,
    #[serde(default)]
    pub scores: Option<ScoreBreakdown>,
}
