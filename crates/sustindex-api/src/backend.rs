use std::future::Future;
use std::pin::Pin;

use sustindex_core::ids::{AnswerId, AttemptId, SurveyId};
use sustindex_core::models::answer::{AnswerSubmission, SavedAnswer};
use sustindex_core::models::attempt::CompletedAttempt;
use sustindex_core::models::document::Document;
use sustindex_core::models::question::Question;

use crate::answers::UploadFile;
use crate::client::ApiClient;
use crate::error::ApiError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The calls a questionnaire run makes against the backend.
///
/// [`ApiClient`] is the real implementation; tests drive the questionnaire
/// against an in-memory one.
pub trait SurveyBackend: Send + Sync {
    /// Open a new attempt at `survey`.
    fn create_attempt(&self, survey: SurveyId) -> BoxFuture<'_, Result<AttemptId, ApiError>>;

    /// Ordered question list for `survey`.
    fn survey_questions(&self, survey: SurveyId) -> BoxFuture<'_, Result<Vec<Question>, ApiError>>;

    /// Persist one question's answer.
    fn save_answer<'a>(
        &'a self,
        submission: &'a AnswerSubmission,
    ) -> BoxFuture<'a, Result<SavedAnswer, ApiError>>;

    /// Attach a file to a saved answer.
    fn upload_document<'a>(
        &'a self,
        answer: AnswerId,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<Document, ApiError>>;

    /// Finalize the attempt; scores are computed server-side.
    fn complete_attempt(&self, attempt: AttemptId) -> BoxFuture<'_, Result<CompletedAttempt, ApiError>>;
}

impl SurveyBackend for ApiClient {
    fn create_attempt(&self, survey: SurveyId) -> BoxFuture<'_, Result<AttemptId, ApiError>> {
        Box::pin(ApiClient::create_attempt(self, survey))
    }

    fn survey_questions(&self, survey: SurveyId) -> BoxFuture<'_, Result<Vec<Question>, ApiError>> {
        Box::pin(ApiClient::survey_questions(self, survey))
    }

    fn save_answer<'a>(
        &'a self,
        submission: &'a AnswerSubmission,
    ) -> BoxFuture<'a, Result<SavedAnswer, ApiError>> {
        Box::pin(ApiClient::save_answer(self, submission))
    }

    fn upload_document<'a>(
        &'a self,
        answer: AnswerId,
        file: &'a UploadFile,
    ) -> BoxFuture<'a, Result<Document, ApiError>> {
        Box::pin(ApiClient::upload_document(self, answer, file))
    }

    fn complete_attempt(&self, attempt: AttemptId) -> BoxFuture<'_, Result<CompletedAttempt, ApiError>> {
        Box::pin(ApiClient::complete_attempt(self, attempt))
    }
}
