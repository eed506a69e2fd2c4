use std::collections::{BTreeMap, BTreeSet};

use sustindex_core::ids::{ChoiceId, QuestionId};
use sustindex_core::models::answer::SubmittedChoice;

/// The choice(s) picked for one question.
///
/// A `Multiple` set is never empty: removing its last choice removes the
/// whole entry from the [`AnswerMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSelection {
    Single(ChoiceId),
    Multiple(BTreeSet<ChoiceId>),
}

impl AnswerSelection {
    pub fn contains(&self, choice: ChoiceId) -> bool {
        match self {
            AnswerSelection::Single(id) => *id == choice,
            AnswerSelection::Multiple(ids) => ids.contains(&choice),
        }
    }

    pub fn choice_ids(&self) -> Vec<ChoiceId> {
        match self {
            AnswerSelection::Single(id) => vec![*id],
            AnswerSelection::Multiple(ids) => ids.iter().copied().collect(),
        }
    }

    /// Wire form: `choice` for single-select, `choices_ids` for multi-select.
    pub fn to_submitted(&self) -> SubmittedChoice {
        match self {
            AnswerSelection::Single(id) => SubmittedChoice::Single { choice: *id },
            AnswerSelection::Multiple(ids) => SubmittedChoice::Multiple {
                choices_ids: ids.iter().copied().collect(),
            },
        }
    }
}

/// At most one answer per question for the lifetime of an attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: BTreeMap<QuestionId, AnswerSelection>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `choice`.
    ///
    /// Single-select replaces whatever was picked. Multi-select flips the
    /// choice in or out of the set and drops the entry once the set is empty.
    pub fn toggle(&mut self, question: QuestionId, choice: ChoiceId, allow_multiple: bool) {
        if !allow_multiple {
            self.entries
                .insert(question, AnswerSelection::Single(choice));
            return;
        }

        let mut ids = match self.entries.remove(&question) {
            Some(AnswerSelection::Multiple(ids)) => ids,
            Some(AnswerSelection::Single(id)) => BTreeSet::from([id]),
            None => BTreeSet::new(),
        };
        if !ids.remove(&choice) {
            ids.insert(choice);
        }
        if !ids.is_empty() {
            self.entries
                .insert(question, AnswerSelection::Multiple(ids));
        }
    }

    pub fn get(&self, question: QuestionId) -> Option<&AnswerSelection> {
        self.entries.get(&question)
    }

    pub fn is_answered(&self, question: QuestionId) -> bool {
        self.entries.contains_key(&question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
