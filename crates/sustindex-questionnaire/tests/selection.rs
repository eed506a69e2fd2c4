use sustindex_api::answers::UploadFile;
use sustindex_core::ids::{ChoiceId, QuestionId};
use sustindex_core::models::answer::SubmittedChoice;
use sustindex_questionnaire::attachments::PendingFiles;
use sustindex_questionnaire::{AnswerMap, AnswerSelection};

const Q: QuestionId = QuestionId(1);

#[test]
fn single_select_replaces_previous_choice() {
    let mut answers = AnswerMap::new();
    answers.toggle(Q, ChoiceId(10), false);
    answers.toggle(Q, ChoiceId(11), false);

    assert_eq!(answers.get(Q), Some(&AnswerSelection::Single(ChoiceId(11))));
    assert_eq!(answers.len(), 1);
}

#[test]
fn single_select_reclick_keeps_choice() {
    let mut answers = AnswerMap::new();
    answers.toggle(Q, ChoiceId(10), false);
    answers.toggle(Q, ChoiceId(10), false);

    assert!(answers.is_answered(Q));
}

#[test]
fn multi_select_toggle_twice_restores_state() {
    let mut answers = AnswerMap::new();
    answers.toggle(Q, ChoiceId(10), true);
    let before = answers.clone();

    answers.toggle(Q, ChoiceId(11), true);
    assert!(answers.get(Q).is_some_and(|s| s.contains(ChoiceId(11))));
    answers.toggle(Q, ChoiceId(11), true);

    assert_eq!(answers, before);
}

#[test]
fn removing_last_multi_choice_unanswers_question() {
    let mut answers = AnswerMap::new();
    answers.toggle(Q, ChoiceId(10), true);
    answers.toggle(Q, ChoiceId(10), true);

    assert!(!answers.is_answered(Q));
    assert!(answers.is_empty());
}

#[test]
fn submitted_shape_follows_selection_kind() {
    let mut answers = AnswerMap::new();
    answers.toggle(Q, ChoiceId(12), true);
    answers.toggle(Q, ChoiceId(10), true);
    answers.toggle(QuestionId(2), ChoiceId(20), false);

    assert_eq!(
        answers.get(Q).map(AnswerSelection::to_submitted),
        Some(SubmittedChoice::Multiple {
            choices_ids: vec![ChoiceId(10), ChoiceId(12)],
        })
    );
    assert_eq!(
        answers.get(QuestionId(2)).map(AnswerSelection::to_submitted),
        Some(SubmittedChoice::Single { choice: ChoiceId(20) })
    );
}

#[test]
fn pending_files_remove_by_index() {
    let mut files = PendingFiles::new();
    files.attach(Q, UploadFile::new("a.pdf", vec![1]));
    files.attach(Q, UploadFile::new("b.pdf", vec![2]));
    files.attach(QuestionId(2), UploadFile::new("c.pdf", vec![3]));

    assert!(files.remove(Q, 5).is_none());
    let removed = files.remove(Q, 0).map(|f| f.file_name);
    assert_eq!(removed.as_deref(), Some("a.pdf"));
    assert_eq!(files.get(Q).len(), 1);
    assert_eq!(files.total(), 2);

    files.remove(Q, 0);
    assert!(files.get(Q).is_empty());
    assert_eq!(files.total(), 1);
}
