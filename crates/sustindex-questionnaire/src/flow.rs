use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, error, info, warn};

use sustindex_api::SurveyBackend;
use sustindex_api::answers::UploadFile;
use sustindex_core::ids::{AttemptId, ChoiceId, QuestionId, SurveyId};
use sustindex_core::models::answer::AnswerSubmission;
use sustindex_core::models::attempt::CompletedAttempt;
use sustindex_core::models::question::Question;

use crate::attachments::PendingFiles;
use crate::error::FlowError;
use crate::selection::{AnswerMap, AnswerSelection};

/// Where a questionnaire run is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowPhase {
    /// Attempt being created, questions being fetched.
    Initializing,
    /// Showing question `i` (0-based).
    Answering(usize),
    /// Last answer and the completion call are in flight.
    Submitting,
    /// Completed; the results page takes over.
    Done(AttemptId),
    /// Start-up failed. Nothing is retried automatically.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub percent: u32,
}

/// What happened while persisting one question on the way forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub uploaded: usize,
    /// Files left queued because the backend did not return an answer id
    /// to attach them to.
    pub skipped_uploads: usize,
    /// The question had already been saved earlier in this run and was
    /// posted again.
    pub resaved: bool,
}

/// Result of a successful [`QuestionnaireFlow::submit`].
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub completed: CompletedAttempt,
    /// How the last question's own save and uploads went.
    pub step: StepOutcome,
}

/// Controller for one attempt at one survey.
///
/// Owns the answer map and the pending-file map for as long as the attempt
/// is on screen. Saves go out strictly in question order, one question at a
/// time, each awaited before the index moves.
pub struct QuestionnaireFlow<B> {
    backend: B,
    survey: SurveyId,
    attempt: Option<AttemptId>,
    questions: Vec<Question>,
    answers: AnswerMap,
    notes: BTreeMap<QuestionId, String>,
    files: PendingFiles,
    saved: BTreeSet<QuestionId>,
    phase: FlowPhase,
}

impl<B: SurveyBackend> QuestionnaireFlow<B> {
    pub fn new(backend: B, survey: SurveyId) -> Self {
        Self {
            backend,
            survey,
            attempt: None,
            questions: Vec::new(),
            answers: AnswerMap::new(),
            notes: BTreeMap::new(),
            files: PendingFiles::new(),
            saved: BTreeSet::new(),
            phase: FlowPhase::Initializing,
        }
    }

    /// Create the flow and run [`initialize`](Self::initialize).
    pub async fn start(backend: B, survey: SurveyId) -> Result<Self, FlowError> {
        let mut flow = Self::new(backend, survey);
        flow.initialize().await?;
        Ok(flow)
    }

    /// Create the attempt, then load the survey's questions.
    pub async fn initialize(&mut self) -> Result<(), FlowError> {
        self.phase = FlowPhase::Initializing;

        let result = self.load().await;
        if let Err(e) = &result {
            error!(survey_id = %self.survey, error = %e, "questionnaire failed to start");
            self.phase = FlowPhase::Error(e.to_string());
        }
        result
    }

    async fn load(&mut self) -> Result<(), FlowError> {
        let attempt = self
            .backend
            .create_attempt(self.survey)
            .await
            .map_err(FlowError::Init)?;
        self.attempt = Some(attempt);

        let questions = self
            .backend
            .survey_questions(self.survey)
            .await
            .map_err(FlowError::Init)?;
        if questions.is_empty() {
            return Err(FlowError::NoQuestions(self.survey));
        }

        info!(
            survey_id = %self.survey,
            attempt_id = %attempt,
            questions = questions.len(),
            "questionnaire started"
        );
        self.questions = questions;
        self.phase = FlowPhase::Answering(0);
        Ok(())
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn attempt_id(&self) -> Option<AttemptId> {
        self.attempt
    }

    pub fn survey_id(&self) -> SurveyId {
        self.survey
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            FlowPhase::Answering(i) => Some(i),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.questions.get(i))
    }

    /// The in-memory selection for the current question. Revisiting a
    /// question reads from here; nothing is fetched.
    pub fn current_selection(&self) -> Option<&AnswerSelection> {
        self.current_question()
            .and_then(|q| self.answers.get(q.id))
    }

    pub fn selection(&self, question: QuestionId) -> Option<&AnswerSelection> {
        self.answers.get(question)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn notes(&self, question: QuestionId) -> Option<&str> {
        self.notes.get(&question).map(String::as_str)
    }

    pub fn pending_files(&self, question: QuestionId) -> &[UploadFile] {
        self.files.get(question)
    }

    pub fn is_saved(&self, question: QuestionId) -> bool {
        self.saved.contains(&question)
    }

    pub fn is_last(&self) -> bool {
        matches!(self.current_index(), Some(i) if i + 1 == self.questions.len())
    }

    /// Advance/submit are only enabled once the current question has an
    /// answer.
    pub fn can_advance(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.is_answered(q.id))
    }

    pub fn progress(&self) -> Option<Progress> {
        let i = self.current_index()?;
        let total = self.questions.len();
        let position = i + 1;
        let percent = ((position as f64 / total as f64) * 100.0).round() as u32;
        Some(Progress {
            position,
            total,
            percent,
        })
    }

    fn answering(&self) -> Result<(usize, &Question), FlowError> {
        match self.phase {
            FlowPhase::Answering(i) => self
                .questions
                .get(i)
                .map(|q| (i, q))
                .ok_or(FlowError::NotAnswering("index out of range")),
            FlowPhase::Initializing => Err(FlowError::NotAnswering("still initializing")),
            FlowPhase::Submitting => Err(FlowError::NotAnswering("submission in flight")),
            FlowPhase::Done(_) => Err(FlowError::NotAnswering("already completed")),
            FlowPhase::Error(_) => Err(FlowError::NotAnswering("failed to start")),
        }
    }

    /// Toggle `choice` on the current question.
    pub fn select_choice(&mut self, choice: ChoiceId) -> Result<(), FlowError> {
        let (_, question) = self.answering()?;
        if !question.has_choice(choice) {
            return Err(FlowError::UnknownChoice {
                question: question.id,
                choice,
            });
        }
        let (id, multiple) = (question.id, question.allow_multiple);
        self.answers.toggle(id, choice, multiple);
        debug!(question_id = %id, choice_id = %choice, "choice toggled");
        Ok(())
    }

    /// Set free-text notes for the current question. Blank text clears them.
    pub fn set_notes(&mut self, text: &str) -> Result<(), FlowError> {
        let (_, question) = self.answering()?;
        let id = question.id;
        if text.trim().is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, text.to_string());
        }
        Ok(())
    }

    /// Queue a file for the current question.
    pub fn attach_file(&mut self, file: UploadFile) -> Result<(), FlowError> {
        let (_, question) = self.answering()?;
        let id = question.id;
        debug!(question_id = %id, file = %file.file_name, "file queued");
        self.files.attach(id, file);
        Ok(())
    }

    /// Drop the queued file at `index` from the current question.
    pub fn remove_file(&mut self, index: usize) -> Result<UploadFile, FlowError> {
        let (_, question) = self.answering()?;
        let id = question.id;
        self.files
            .remove(id, index)
            .ok_or(FlowError::UnknownFile { question: id, index })
    }

    /// Save the current answer (and its files), then move to the next
    /// question. On failure the index stays put so the user can retry.
    pub async fn advance(&mut self) -> Result<StepOutcome, FlowError> {
        let (i, question) = self.answering()?;
        if i + 1 == self.questions.len() {
            return Err(FlowError::LastQuestion);
        }
        let id = question.id;
        if !self.answers.is_answered(id) {
            return Err(FlowError::Unanswered(id));
        }

        let outcome = self.persist(id).await?;
        self.phase = FlowPhase::Answering(i + 1);
        Ok(outcome)
    }

    /// Step back one question. No I/O; answers stay as they are.
    pub fn retreat(&mut self) -> Result<(), FlowError> {
        let (i, _) = self.answering()?;
        if i == 0 {
            return Err(FlowError::AtFirstQuestion);
        }
        self.phase = FlowPhase::Answering(i - 1);
        Ok(())
    }

    /// Save the last answer and complete the attempt.
    ///
    /// Either failure puts the flow back on the last question so the user
    /// can try again. Files the last save could not carry stay queued and
    /// are counted in the returned step.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        let (i, question) = self.answering()?;
        if i + 1 != self.questions.len() {
            return Err(FlowError::NotLastQuestion);
        }
        let id = question.id;
        if !self.answers.is_answered(id) {
            return Err(FlowError::Unanswered(id));
        }
        let attempt = self
            .attempt
            .ok_or(FlowError::NotAnswering("no attempt"))?;

        self.phase = FlowPhase::Submitting;

        let step = match self.persist(id).await {
            Ok(step) => step,
            Err(e) => {
                self.phase = FlowPhase::Answering(i);
                return Err(e);
            }
        };

        match self.backend.complete_attempt(attempt).await {
            Ok(completed) => {
                info!(
                    attempt_id = %attempt,
                    grade = %completed.attempt.overall_grade,
                    "attempt completed"
                );
                self.phase = FlowPhase::Done(attempt);
                Ok(SubmitOutcome { completed, step })
            }
            Err(e) => {
                error!(attempt_id = %attempt, error = %e, "completing attempt failed");
                self.phase = FlowPhase::Answering(i);
                Err(FlowError::Complete(e))
            }
        }
    }

    /// Post the answer for `question`, then upload its queued files one by
    /// one. Files leave the queue as they upload, so a retry after a failed
    /// upload does not send them twice.
    async fn persist(&mut self, question: QuestionId) -> Result<StepOutcome, FlowError> {
        let attempt = self
            .attempt
            .ok_or(FlowError::NotAnswering("no attempt"))?;
        let selection = self
            .answers
            .get(question)
            .ok_or(FlowError::Unanswered(question))?;

        let resaved = self.saved.contains(&question);
        if resaved {
            // The first save is never reconciled with this one; the backend
            // decides whether a second answer for the question is accepted.
            warn!(
                attempt_id = %attempt,
                question_id = %question,
                "posting an answer for a question already saved in this attempt"
            );
        }

        let submission = AnswerSubmission {
            attempt,
            question,
            selection: selection.to_submitted(),
            notes: self.notes.get(&question).cloned(),
        };
        let saved = self
            .backend
            .save_answer(&submission)
            .await
            .map_err(|source| {
                error!(question_id = %question, error = %source, "answer save failed");
                FlowError::Save { question, source }
            })?;
        self.saved.insert(question);

        let mut outcome = StepOutcome {
            resaved,
            ..Default::default()
        };
        let queued = self.files.get(question).len();
        if queued == 0 {
            return Ok(outcome);
        }

        let Some(answer_id) = saved.id else {
            warn!(
                question_id = %question,
                files = queued,
                "answer saved without an id; files stay queued"
            );
            outcome.skipped_uploads = queued;
            return Ok(outcome);
        };

        while let Some(file) = self.files.get(question).first() {
            let file_name = file.file_name.clone();
            self.backend
                .upload_document(answer_id, file)
                .await
                .map_err(|source| {
                    error!(question_id = %question, file = %file_name, error = %source, "upload failed");
                    FlowError::Upload {
                        question,
                        file: file_name.clone(),
                        source,
                    }
                })?;
            self.files.pop_front(question);
            outcome.uploaded += 1;
        }
        Ok(outcome)
    }
}
