use serde::{Deserialize, Serialize};

use crate::ids::SurveyId;

use super::null_as_default;

/// A questionnaire template. Read-only on this side of the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub allow_multiple_attempts: bool,
    #[serde(default = "default_true")]
    pub show_results_immediately: bool,
    #[serde(default)]
    pub created_at: Option<jiff::Timestamp>,
}

fn default_true() -> bool {
    true
}
