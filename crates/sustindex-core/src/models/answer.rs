use serde::{Deserialize, Serialize};

use crate::ids::{AnswerId, AttemptId, ChoiceId, QuestionId};

use super::document::Document;
use super::null_as_default;

/// The selected choice(s) as they go over the wire.
///
/// Single-select questions post `choice`, multi-select questions post
/// `choices_ids`; never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedChoice {
    Single { choice: ChoiceId },
    Multiple { choices_ids: Vec<ChoiceId> },
}

/// Body of `POST answers/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub attempt: AttemptId,
    pub question: QuestionId,
    #[serde(flatten)]
    pub selection: SubmittedChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// What the backend echoes back after an answer is stored.
///
/// The create serializer does not always include the primary key; without it
/// no document can be attached to the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAnswer {
    #[serde(default)]
    pub id: Option<AnswerId>,
    pub question: QuestionId,
    #[serde(default)]
    pub choice: Option<ChoiceId>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-question answer as embedded in an attempt's detail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub id: AnswerId,
    #[serde(default)]
    pub question: Option<QuestionId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_text: String,
    #[serde(default)]
    pub choice: Option<ChoiceId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choice_text: String,
    #[serde(default)]
    pub choices: Vec<ChoiceId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices_display: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub answered_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub total_score: i64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl AnswerSummary {
    /// `choices_display` when the backend filled it in, else the single
    /// choice text.
    pub fn selection_label(&self) -> &str {
        if self.choices_display.is_empty() {
            &self.choice_text
        } else {
            &self.choices_display
        }
    }

    /// Notes, only when they contain something other than whitespace.
    pub fn visible_notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}
