//! Template contexts. Each page gets a flat, display-ready struct so the
//! templates only substitute strings; rounding and grade tones are decided
//! here, once.

use serde::Serialize;

use sustindex_core::grade::GradeTone;
use sustindex_core::ids::ChoiceId;
use sustindex_core::models::attempt::Attempt;
use sustindex_core::models::document::{Document, pending_size_label};
use sustindex_core::models::question::Question;
use sustindex_core::models::survey::Survey;
use sustindex_core::models::user::User;
use sustindex_core::stats::{DashboardSummary, HistoryFilter, HistorySummary, average_score, rounded};

use crate::text::html_to_text;

const PROGRESS_WIDTH: usize = 20;
const UNSET: &str = "-";

/// Terminal colouring applied to grades and priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Plain,
    Ansi,
}

impl Palette {
    fn paint(&self, text: &str, code: u8) -> String {
        match self {
            Palette::Plain => text.to_string(),
            Palette::Ansi => format!("\u{1b}[1;{code}m{text}\u{1b}[0m"),
        }
    }

    fn grade(&self, grade: &str) -> String {
        if grade.trim().is_empty() {
            return UNSET.to_string();
        }
        self.paint(grade, GradeTone::for_grade(grade).ansi_code())
    }
}

fn date(ts: Option<jiff::Timestamp>) -> Option<String> {
    ts.map(|t| t.strftime("%Y-%m-%d").to_string())
}

fn or_unset(value: &str) -> String {
    if value.trim().is_empty() {
        UNSET.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoresView {
    total: i64,
    environmental: i64,
    social: i64,
    governance: i64,
}

impl ScoresView {
    fn of(attempt: &Attempt) -> Self {
        Self {
            total: rounded(attempt.total_score),
            environmental: rounded(attempt.environmental_score),
            social: rounded(attempt.social_score),
            governance: rounded(attempt.governance_score),
        }
    }
}

// Results

#[derive(Debug, Serialize)]
pub(crate) struct ResultsView {
    attempt_id: i64,
    survey_name: String,
    completed_on: Option<String>,
    is_completed: bool,
    grade: String,
    tone: GradeTone,
    scores: ScoresView,
    recommendations: Vec<RecommendationView>,
    answers: Vec<AnswerView>,
}

#[derive(Debug, Serialize)]
struct RecommendationView {
    category: String,
    priority: String,
    high: bool,
    suggestion: String,
}

#[derive(Debug, Serialize)]
struct AnswerView {
    number: usize,
    question: String,
    selection: String,
    points: i64,
    notes: Option<String>,
    documents: Vec<DocumentView>,
}

#[derive(Debug, Serialize)]
struct DocumentView {
    title: String,
    size: String,
    uploaded_on: Option<String>,
    url: String,
}

impl DocumentView {
    fn of(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            size: doc.size_label(),
            uploaded_on: date(doc.uploaded_at),
            url: doc.file.clone(),
        }
    }
}

impl ResultsView {
    pub(crate) fn new(attempt: &Attempt, palette: Palette) -> Self {
        let recommendations = attempt
            .recommendations
            .iter()
            .map(|rec| {
                let label = format!("{} Priority", rec.priority);
                let high = rec.is_high_priority();
                RecommendationView {
                    category: rec.category.clone(),
                    priority: palette.paint(&label, if high { 31 } else { 33 }),
                    high,
                    suggestion: rec.suggestion.clone(),
                }
            })
            .collect();

        let answers = attempt
            .answers
            .iter()
            .enumerate()
            .map(|(i, answer)| AnswerView {
                number: i + 1,
                question: html_to_text(&answer.question_text).replace('\n', " "),
                selection: answer.selection_label().to_string(),
                points: answer.total_score,
                notes: answer.visible_notes().map(str::to_string),
                documents: answer.documents.iter().map(DocumentView::of).collect(),
            })
            .collect();

        Self {
            attempt_id: attempt.id.0,
            survey_name: attempt.survey_name.clone(),
            completed_on: date(attempt.completed_at),
            is_completed: attempt.is_completed,
            grade: palette.grade(&attempt.overall_grade),
            tone: GradeTone::for_grade(&attempt.overall_grade),
            scores: ScoresView::of(attempt),
            recommendations,
            answers,
        }
    }
}

// Listings

#[derive(Debug, Serialize)]
struct AttemptRow {
    id: i64,
    survey_name: String,
    started_on: Option<String>,
    completed_on: Option<String>,
    is_completed: bool,
    grade: String,
    scores: ScoresView,
}

impl AttemptRow {
    fn of(attempt: &Attempt, palette: Palette) -> Self {
        Self {
            id: attempt.id.0,
            survey_name: attempt.survey_name.clone(),
            started_on: date(attempt.started_at),
            completed_on: date(attempt.completed_at),
            is_completed: attempt.is_completed,
            grade: palette.grade(&attempt.overall_grade),
            scores: ScoresView::of(attempt),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardView {
    name: String,
    company: Option<String>,
    tier: &'static str,
    completed_count: usize,
    in_progress_count: usize,
    average: String,
    latest_grade: String,
    latest: Option<AttemptRow>,
    recent: Vec<AttemptRow>,
}

impl DashboardView {
    pub(crate) fn new(user: &User, attempts: &[Attempt], palette: Palette) -> Self {
        let summary = DashboardSummary::from_attempts(attempts);
        let latest = summary.latest().map(|a| AttemptRow::of(a, palette));
        Self {
            name: user.display_name().to_string(),
            company: Some(user.company_name.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            tier: user.membership_type.label(),
            completed_count: summary.completed_count,
            in_progress_count: summary.in_progress_count,
            average: summary.average_label(),
            latest_grade: latest
                .as_ref()
                .map(|row| row.grade.clone())
                .unwrap_or_else(|| UNSET.to_string()),
            latest,
            recent: summary
                .recent
                .iter()
                .map(|a| AttemptRow::of(a, palette))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FilterTab {
    label: &'static str,
    count: usize,
    active: bool,
}

fn filter_label(filter: HistoryFilter) -> &'static str {
    match filter {
        HistoryFilter::All => "All",
        HistoryFilter::Completed => "Completed",
        HistoryFilter::InProgress => "In Progress",
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryView {
    total: usize,
    completed: usize,
    in_progress: usize,
    average: String,
    filters: Vec<FilterTab>,
    attempts: Vec<AttemptRow>,
    empty_message: String,
}

impl HistoryView {
    pub(crate) fn new(attempts: &[Attempt], filter: HistoryFilter, palette: Palette) -> Self {
        let summary = HistorySummary::from_attempts(attempts);
        let filters = [HistoryFilter::All, HistoryFilter::Completed, HistoryFilter::InProgress]
            .into_iter()
            .map(|f| FilterTab {
                label: filter_label(f),
                count: summary.count_for(f),
                active: f == filter,
            })
            .collect();

        Self {
            total: summary.total,
            completed: summary.completed,
            in_progress: summary.in_progress,
            average: average_score(attempts)
                .map(|avg| avg.to_string())
                .unwrap_or_else(|| UNSET.to_string()),
            filters,
            attempts: filter
                .apply(attempts)
                .into_iter()
                .map(|a| AttemptRow::of(a, palette))
                .collect(),
            empty_message: filter.empty_message(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SurveyRow {
    id: i64,
    name: String,
    description: String,
    questions: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct SurveysView {
    surveys: Vec<SurveyRow>,
}

impl SurveysView {
    pub(crate) fn new(surveys: &[Survey]) -> Self {
        Self {
            surveys: surveys
                .iter()
                .filter(|s| s.is_active)
                .map(|s| SurveyRow {
                    id: s.id.0,
                    name: s.name.clone(),
                    description: s.description.trim().to_string(),
                    questions: s.total_questions,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileView {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    company_name: String,
    phone: String,
    tier: &'static str,
    member_since: Option<String>,
}

impl ProfileView {
    pub(crate) fn new(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: or_unset(&user.email),
            first_name: or_unset(&user.first_name),
            last_name: or_unset(&user.last_name),
            company_name: or_unset(&user.company_name),
            phone: or_unset(&user.phone),
            tier: user.membership_type.label(),
            member_since: date(user.created_at),
        }
    }
}

// Questionnaire screen

/// A file waiting to be uploaded with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingFileView {
    pub name: String,
    /// `x.y KB`
    pub size: String,
}

impl PendingFileView {
    pub fn new(name: impl Into<String>, bytes: u64) -> Self {
        Self {
            name: name.into(),
            size: pending_size_label(bytes),
        }
    }
}

/// Everything the questionnaire screen shows for the current question.
#[derive(Debug, Clone)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub percent: u32,
    pub selected: Vec<ChoiceId>,
    pub notes: Option<&'a str>,
    pub pending_files: Vec<PendingFileView>,
    pub is_last: bool,
}

#[derive(Debug, Serialize)]
struct ChoiceRow {
    key: usize,
    text: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionPage {
    position: usize,
    total: usize,
    percent: u32,
    bar: String,
    category: String,
    text: String,
    attachment: Option<String>,
    multiple: bool,
    choices: Vec<ChoiceRow>,
    notes: Option<String>,
    files: Vec<PendingFileView>,
    is_last: bool,
    can_advance: bool,
}

impl QuestionPage {
    pub(crate) fn new(view: &QuestionView<'_>) -> Self {
        let q = view.question;
        let filled = (view.percent as usize * PROGRESS_WIDTH / 100).min(PROGRESS_WIDTH);
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(PROGRESS_WIDTH - filled));

        let choices = q
            .choices
            .iter()
            .enumerate()
            .map(|(i, c)| ChoiceRow {
                key: i + 1,
                text: c.text.clone(),
                selected: view.selected.contains(&c.id),
            })
            .collect();

        Self {
            position: view.position,
            total: view.total,
            percent: view.percent,
            bar,
            category: q.category_name.clone(),
            text: html_to_text(&q.text),
            attachment: q.attachment_url().map(str::to_string),
            multiple: q.allow_multiple,
            choices,
            notes: view
                .notes
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string),
            files: view.pending_files.clone(),
            is_last: view.is_last,
            can_advance: !view.selected.is_empty(),
        }
    }
}
