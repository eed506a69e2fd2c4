use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ChoiceId, QuestionId, SurveyId};

use super::null_as_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub survey: Option<SurveyId>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    /// Rich text, HTML as authored in the admin.
    pub text: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    pub fn has_choice(&self, id: ChoiceId) -> bool {
        self.choice(id).is_some()
    }

    /// Attachment URL, ignoring the empty string the backend sends for
    /// questions without a file.
    pub fn attachment_url(&self) -> Option<&str> {
        self.attachment.as_deref().filter(|a| !a.trim().is_empty())
    }
}
