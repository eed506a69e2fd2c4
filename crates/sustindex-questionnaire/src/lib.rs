//! sustindex-questionnaire
//!
//! Drives one attempt at a survey: a fixed, ordered question list, the
//! in-memory answers and queued files for each question, and the ordered
//! save calls made as the user moves forward.

pub mod attachments;
pub mod error;
pub mod flow;
pub mod selection;

pub use flow::{FlowPhase, Progress, QuestionnaireFlow, StepOutcome, SubmitOutcome};
pub use selection::{AnswerMap, AnswerSelection};
