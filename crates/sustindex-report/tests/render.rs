use serde_json::json;

use sustindex_core::ids::ChoiceId;
use sustindex_core::models::attempt::Attempt;
use sustindex_core::models::question::Question;
use sustindex_core::models::survey::Survey;
use sustindex_core::models::user::User;
use sustindex_core::stats::HistoryFilter;
use sustindex_report::text::html_to_text;
use sustindex_report::{
    Palette, PendingFileView, QuestionView, Renderer, render_dashboard, render_history,
    render_profile, render_question, render_results, render_surveys,
};

fn user() -> User {
    serde_json::from_value(json!({
        "id": 3,
        "username": "greenco",
        "email": "ops@greenco.example",
        "first_name": "Ada",
        "last_name": "",
        "membership_type": "silver",
        "company_name": "GreenCo",
        "phone": "",
        "created_at": "2025-01-15T09:30:00Z",
    }))
    .unwrap()
}

fn completed(id: i64, total: f64, grade: &str) -> serde_json::Value {
    json!({
        "id": id,
        "survey": 4,
        "survey_name": "ESG Baseline",
        "started_at": "2025-03-01T10:00:00Z",
        "completed_at": "2025-03-02T10:00:00Z",
        "is_completed": true,
        "total_score": total,
        "environmental_score": 71.6,
        "social_score": 80.4,
        "governance_score": 90.5,
        "overall_grade": grade,
    })
}

fn in_progress(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "survey": 4,
        "survey_name": "ESG Baseline",
        "started_at": "2025-03-05T10:00:00Z",
        "completed_at": null,
        "is_completed": false,
        "overall_grade": "",
    })
}

fn attempts(values: Vec<serde_json::Value>) -> Vec<Attempt> {
    serde_json::from_value(serde_json::Value::Array(values)).unwrap()
}

fn detailed_attempt() -> Attempt {
    let mut value = completed(12, 82.5, "A-");
    value["answers"] = json!([
        {
            "id": 1,
            "question": 7,
            "question_text": "<p>Do you track <strong>Scope 1</strong> emissions?</p>",
            "choice": 70,
            "choice_text": "Yes, audited",
            "choices_display": "",
            "notes": "Audited by a third party",
            "total_score": 10,
            "documents": [{
                "id": 5,
                "title": "Emissions report",
                "file": "http://files.example/report.pdf",
                "uploaded_at": "2025-03-02T09:00:00Z",
                "file_size": 2048,
                "file_size_display": "2.0 KB",
            }],
        },
        {
            "id": 2,
            "question": 8,
            "question_text": "Which policies are published?",
            "choice": null,
            "choice_text": null,
            "choices_display": "Ethics, Diversity",
            "notes": "   ",
            "total_score": 6,
            "documents": [],
        },
    ]);
    value["recommendations"] = json!([
        { "category": "Environmental", "priority": "High", "suggestion": "Set a reduction target." },
        { "category": "Social", "priority": "Medium", "suggestion": "Publish a diversity report." },
    ]);
    serde_json::from_value(value).unwrap()
}

#[test]
fn results_show_grade_and_rounded_scores() {
    let page = render_results(&detailed_attempt()).unwrap();

    assert!(page.contains("# Assessment Complete!"));
    assert!(page.contains("## ESG Baseline"));
    assert!(page.contains("Completed on 2025-03-02"));
    assert!(page.contains("**Grade:** A-"));
    assert!(page.contains("**Overall Score:** 83 out of 100"));
    assert!(page.contains("- **Environmental:** 72"));
    assert!(page.contains("- **Social:** 80"));
    assert!(page.contains("- **Governance:** 91"));
}

#[test]
fn results_list_recommendations_and_answers() {
    let page = render_results(&detailed_attempt()).unwrap();

    assert!(page.contains("- **Environmental** [High Priority] Set a reduction target."));
    assert!(page.contains("- **Social** [Medium Priority] Publish a diversity report."));
    assert!(page.contains("### Question 1: Do you track Scope 1 emissions?"));
    assert!(page.contains("- **Answer:** Yes, audited (10 pts)"));
    assert!(page.contains("- Emissions report (2.0 KB, 2025-03-02) http://files.example/report.pdf"));
    assert!(page.contains("- **Notes:** Audited by a third party"));
    assert!(page.contains("- **Answer:** Ethics, Diversity (6 pts)"));
    assert_eq!(page.matches("**Notes:**").count(), 1);
}

#[test]
fn results_without_recommendations_skip_section() {
    let attempt: Attempt = serde_json::from_value(completed(1, 50.0, "C")).unwrap();
    let page = render_results(&attempt).unwrap();

    assert!(!page.contains("## Recommendations"));
    assert!(!page.contains("## Your Answers"));
    assert!(!page.contains("\n\n\n"));
}

#[test]
fn ansi_palette_colours_grade_by_tone() {
    let renderer = Renderer::new().unwrap().with_palette(Palette::Ansi);

    let page = renderer.results(&detailed_attempt()).unwrap();
    assert!(page.contains("\u{1b}[1;32mA-\u{1b}[0m"));
    assert!(page.contains("\u{1b}[1;31mHigh Priority\u{1b}[0m"));
    assert!(page.contains("\u{1b}[1;33mMedium Priority\u{1b}[0m"));

    let failing: Attempt = serde_json::from_value(completed(2, 30.0, "D")).unwrap();
    let page = renderer.results(&failing).unwrap();
    assert!(page.contains("\u{1b}[1;31mD\u{1b}[0m"));
}

#[test]
fn dashboard_summarises_attempts() {
    let list = attempts(vec![
        in_progress(20),
        completed(19, 80.0, "A"),
        completed(18, 90.0, "A+"),
        completed(17, 70.0, "B"),
        completed(16, 60.0, "C"),
    ]);

    let page = render_dashboard(&user(), &list).unwrap();

    assert!(page.contains("# Welcome back, Ada!"));
    assert!(page.contains("GreenCo | Silver Member"));
    assert!(page.contains("- **Total Assessments:** 4"));
    assert!(page.contains("- **Average Score:** 75"));
    assert!(page.contains("- **Latest Grade:** A\n"));
    assert!(page.contains("- **In Progress:** 1"));
    assert!(page.contains("- #19 ESG Baseline (2025-03-02): A, 80 points"));
    assert!(page.contains("- #17 ESG Baseline"));
    assert!(!page.contains("#16"));
}

#[test]
fn dashboard_without_attempts_shows_placeholders() {
    let mut anonymous_company = user();
    anonymous_company.company_name = String::new();
    anonymous_company.first_name = String::new();

    let page = render_dashboard(&anonymous_company, &[]).unwrap();

    assert!(page.contains("# Welcome back, greenco!"));
    assert!(page.contains("\nSilver Member"));
    assert!(page.contains("- **Average Score:** -"));
    assert!(page.contains("- **Latest Grade:** -"));
    assert!(!page.contains("Latest Assessment Breakdown"));
    assert!(page.contains("No assessments yet"));
}

#[test]
fn history_filters_and_counts() {
    let list = attempts(vec![
        in_progress(3),
        completed(2, 80.0, "A"),
        completed(1, 91.0, "A+"),
    ]);

    let page = render_history(&list, HistoryFilter::InProgress).unwrap();

    assert!(page.contains("- **Total:** 3"));
    assert!(page.contains("- **Average Score:** 86"));
    assert!(page.contains("Filter: All (3)  Completed (2)  [In Progress (1)]"));
    assert!(page.contains("## #3 ESG Baseline"));
    assert!(page.contains("- In progress"));
    assert!(!page.contains("## #2"));
}

#[test]
fn history_empty_filter_message() {
    let list = attempts(vec![in_progress(3)]);

    let page = render_history(&list, HistoryFilter::Completed).unwrap();
    assert!(page.contains("No Assessments Found"));
    assert!(page.contains("No completed assessments found"));

    let page = render_history(&[], HistoryFilter::All).unwrap();
    assert!(page.contains("No assessments yet"));
    assert!(page.contains("- **Average Score:** -"));
}

#[test]
fn surveys_page_lists_active_surveys() {
    let surveys: Vec<Survey> = serde_json::from_value(json!([
        { "id": 4, "name": "ESG Baseline", "description": "Annual check", "total_questions": 12 },
        { "id": 5, "name": "Retired", "is_active": false, "total_questions": 3 },
    ]))
    .unwrap();

    let page = render_surveys(&surveys).unwrap();

    assert!(page.contains("## [4] ESG Baseline"));
    assert!(page.contains("Annual check"));
    assert!(page.contains("- 12 questions"));
    assert!(!page.contains("Retired"));
}

#[test]
fn surveys_page_empty_state() {
    let page = render_surveys(&[]).unwrap();
    assert!(page.contains("No Surveys Available"));
}

#[test]
fn profile_marks_blank_fields() {
    let page = render_profile(&user()).unwrap();

    assert!(page.contains("- **Username:** greenco (cannot be changed)"));
    assert!(page.contains("- **Last Name:** -"));
    assert!(page.contains("- **Phone:** -"));
    assert!(page.contains("- **Membership:** Silver"));
    assert!(page.contains("- **Member Since:** 2025-01-15"));
}

fn question() -> Question {
    serde_json::from_value(json!({
        "id": 7,
        "category_name": "Environmental",
        "text": "<p>Which <em>renewable</em> sources do you use?</p>",
        "allow_multiple": true,
        "attachment": "",
        "choices": [
            { "id": 70, "text": "Solar" },
            { "id": 71, "text": "Wind" },
            { "id": 72, "text": "None" },
        ],
    }))
    .unwrap()
}

#[test]
fn question_screen_shows_progress_and_state() {
    let q = question();
    let view = QuestionView {
        question: &q,
        position: 2,
        total: 4,
        percent: 50,
        selected: vec![ChoiceId(71)],
        notes: Some("Rooftop array planned"),
        pending_files: vec![PendingFileView::new("invoice.pdf", 1536)],
        is_last: false,
    };

    let page = render_question(&view).unwrap();

    assert!(page.starts_with("Question 2 of 4  [##########..........] 50%"));
    assert!(page.contains("Which renewable sources do you use?"));
    assert!(page.contains("Select all that apply:"));
    assert!(page.contains("[ ] 1. Solar"));
    assert!(page.contains("[x] 2. Wind"));
    assert!(page.contains("Notes: Rooftop array planned"));
    assert!(page.contains("1. invoice.pdf (1.5 KB)"));
    assert!(page.contains("[n] next"));
    assert!(page.contains("[p] previous"));
    assert!(!page.contains("Reference document"));
}

#[test]
fn last_unanswered_question_offers_no_submit() {
    let q = question();
    let view = QuestionView {
        question: &q,
        position: 1,
        total: 1,
        percent: 100,
        selected: Vec::new(),
        notes: None,
        pending_files: Vec::new(),
        is_last: true,
    };

    let page = render_question(&view).unwrap();

    assert!(page.contains("answer to submit"));
    assert!(!page.contains("[s] submit"));
    assert!(!page.contains("[p] previous"));
    assert!(!page.contains("Files to upload"));
}

#[test]
fn html_is_flattened_to_lines() {
    assert_eq!(
        html_to_text("<p>First &amp; <b>bold</b></p><ul><li>one</li><li>two</li></ul>"),
        "First & bold\none\ntwo"
    );
    assert_eq!(html_to_text("  plain text "), "plain text");
}
