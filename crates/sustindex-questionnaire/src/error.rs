use thiserror::Error;

use sustindex_api::error::ApiError;
use sustindex_core::ids::{ChoiceId, QuestionId, SurveyId};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("failed to start questionnaire: {0}")]
    Init(#[source] ApiError),

    #[error("survey {0} has no questions")]
    NoQuestions(SurveyId),

    #[error("question {0} has not been answered")]
    Unanswered(QuestionId),

    #[error("choice {choice} does not belong to question {question}")]
    UnknownChoice {
        question: QuestionId,
        choice: ChoiceId,
    },

    #[error("no pending file #{index} on question {question}")]
    UnknownFile { question: QuestionId, index: usize },

    #[error("questionnaire is not accepting answers ({0})")]
    NotAnswering(&'static str),

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("this is the last question; submit instead")]
    LastQuestion,

    #[error("submit is only available on the last question")]
    NotLastQuestion,

    #[error("failed to save answer to question {question}: {source}")]
    Save {
        question: QuestionId,
        #[source]
        source: ApiError,
    },

    #[error("failed to upload {file} for question {question}: {source}")]
    Upload {
        question: QuestionId,
        file: String,
        #[source]
        source: ApiError,
    },

    #[error("failed to complete attempt: {0}")]
    Complete(#[source] ApiError),
}
