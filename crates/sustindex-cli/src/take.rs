use std::process::ExitCode;

use tracing::warn;

use sustindex_api::{ApiClient, SurveyBackend};
use sustindex_api::answers::UploadFile;
use sustindex_core::ids::{ChoiceId, SurveyId};
use sustindex_core::models::document::pending_size_label;
use sustindex_core::models::question::Question;
use sustindex_questionnaire::{FlowPhase, QuestionnaireFlow, StepOutcome};
use sustindex_report::{PendingFileView, QuestionView};

use crate::commands::{App, alert};
use crate::input::{HELP, TakeInput, parse_input};

/// The questionnaire page: one prompt per keystroke-line until the attempt
/// is submitted or the user quits.
pub async fn run(app: &mut App, survey: SurveyId) -> eyre::Result<ExitCode> {
    let backend: ApiClient = app.session.client().clone();
    let mut flow = QuestionnaireFlow::new(backend, survey);

    println!("Starting assessment...");
    if let Err(e) = flow.initialize().await {
        alert(format!("Failed to start assessment: {e}"));
        return Ok(ExitCode::FAILURE);
    }

    loop {
        let Some(question) = flow.current_question() else {
            break;
        };
        let choices: Vec<ChoiceId> = question.choices.iter().map(|c| c.id).collect();
        let page = app.renderer.question(&question_view(&flow, question))?;
        println!("\n{page}");

        let Some(line) = app.prompt.ask("> ").await? else {
            leave(&flow);
            return Ok(ExitCode::SUCCESS);
        };

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match input {
            TakeInput::Toggle(n) => match choices.get(n - 1) {
                Some(choice) => {
                    if let Err(e) = flow.select_choice(*choice) {
                        alert(e);
                    }
                }
                None => alert(format!("no choice {n}")),
            },
            TakeInput::Next => match flow.advance().await {
                Ok(outcome) => report_uploads(&outcome),
                Err(e) => alert(e),
            },
            TakeInput::Previous => {
                if let Err(e) = flow.retreat() {
                    alert(e);
                }
            }
            TakeInput::Attach(path) => match UploadFile::from_path(&path).await {
                Ok(file) => {
                    let label = format!("{} ({})", file.file_name, pending_size_label(file.size()));
                    match flow.attach_file(file) {
                        Ok(()) => println!("Attached {label}"),
                        Err(e) => alert(e),
                    }
                }
                Err(e) => alert(format!("Cannot read {}: {e}", path.display())),
            },
            TakeInput::Remove(n) => match flow.remove_file(n - 1) {
                Ok(file) => println!("Removed {}", file.file_name),
                Err(e) => alert(e),
            },
            TakeInput::Note(text) => {
                if let Err(e) = flow.set_notes(&text) {
                    alert(e);
                }
            }
            TakeInput::Submit => match flow.submit().await {
                Ok(done) => {
                    report_uploads(&done.step);
                    let completed = done.completed.attempt;
                    // The detail view carries answers and recommendations;
                    // fall back to what the completion returned.
                    let attempt = match app.session.client().attempt(completed.id).await {
                        Ok(detail) => detail,
                        Err(e) => {
                            warn!(attempt_id = %completed.id, error = %e, "failed to reload attempt");
                            completed
                        }
                    };
                    println!("\n{}", app.renderer.results(&attempt)?);
                    return Ok(ExitCode::SUCCESS);
                }
                Err(e) => alert(format!("Error submitting assessment: {e}")),
            },
            TakeInput::Quit => {
                leave(&flow);
                return Ok(ExitCode::SUCCESS);
            }
            TakeInput::Help => println!("{HELP}"),
        }
    }

    match flow.phase() {
        FlowPhase::Done(id) => println!("Attempt {id} completed."),
        other => warn!(phase = ?other, "questionnaire loop ended unexpectedly"),
    }
    Ok(ExitCode::SUCCESS)
}

fn question_view<'a, B: SurveyBackend>(
    flow: &'a QuestionnaireFlow<B>,
    question: &'a Question,
) -> QuestionView<'a> {
    let progress = flow.progress();
    QuestionView {
        question,
        position: progress.map_or(1, |p| p.position),
        total: progress.map_or(flow.questions().len(), |p| p.total),
        percent: progress.map_or(0, |p| p.percent),
        selected: flow
            .current_selection()
            .map(|s| s.choice_ids())
            .unwrap_or_default(),
        notes: flow.notes(question.id),
        pending_files: flow
            .pending_files(question.id)
            .iter()
            .map(|f| PendingFileView::new(f.file_name.clone(), f.size()))
            .collect(),
        is_last: flow.is_last(),
    }
}

fn report_uploads(outcome: &StepOutcome) {
    if outcome.uploaded > 0 {
        println!("Uploaded {} file(s).", outcome.uploaded);
    }
    if outcome.skipped_uploads > 0 {
        alert(format!(
            "{} file(s) could not be attached: the answer was saved without an id",
            outcome.skipped_uploads
        ));
    }
}

fn leave<B: SurveyBackend>(flow: &QuestionnaireFlow<B>) {
    if let Some(id) = flow.attempt_id() {
        println!("Leaving assessment. Attempt {id} stays in progress.");
    }
}
