use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use sustindex_core::models::attempt::Attempt;
use sustindex_core::models::survey::Survey;
use sustindex_core::models::user::User;
use sustindex_core::stats::HistoryFilter;

use crate::error::ReportError;
use crate::text::tidy;
use crate::views::{
    DashboardView, HistoryView, Palette, ProfileView, QuestionPage, QuestionView, ResultsView,
    SurveysView,
};

const RESULTS: &str = "results.md";
const DASHBOARD: &str = "dashboard.md";
const HISTORY: &str = "history.md";
const SURVEYS: &str = "surveys.md";
const PROFILE: &str = "profile.md";
const QUESTION: &str = "question.md";

const TEMPLATES: [(&str, &str); 6] = [
    (RESULTS, include_str!("../templates/results.md.tera")),
    (DASHBOARD, include_str!("../templates/dashboard.md.tera")),
    (HISTORY, include_str!("../templates/history.md.tera")),
    (SURVEYS, include_str!("../templates/surveys.md.tera")),
    (PROFILE, include_str!("../templates/profile.md.tera")),
    (QUESTION, include_str!("../templates/question.md.tera")),
];

/// Renders every page from the embedded templates.
///
/// Output is plain Markdown-ish text. With [`Palette::Ansi`] grades and
/// priorities are coloured for the terminal; keep [`Palette::Plain`] for
/// anything headed to [`generate_docx`](crate::docx::generate_docx).
pub struct Renderer {
    tera: Tera,
    palette: Palette,
}

impl Renderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)
            .map_err(|e| ReportError::TemplateParse(e.to_string()))?;
        Ok(Self {
            tera,
            palette: Palette::Plain,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    fn render<T: Serialize>(&self, name: &str, view: &T) -> Result<String, ReportError> {
        let value = serde_json::to_value(view)?;
        let context =
            Context::from_value(value).map_err(|e| ReportError::TemplateRender(e.to_string()))?;
        let rendered = self.tera.render(name, &context)?;
        debug!(template = name, bytes = rendered.len(), "page rendered");
        Ok(tidy(&rendered))
    }

    pub fn results(&self, attempt: &Attempt) -> Result<String, ReportError> {
        self.render(RESULTS, &ResultsView::new(attempt, self.palette))
    }

    pub fn dashboard(&self, user: &User, attempts: &[Attempt]) -> Result<String, ReportError> {
        self.render(DASHBOARD, &DashboardView::new(user, attempts, self.palette))
    }

    pub fn history(&self, attempts: &[Attempt], filter: HistoryFilter) -> Result<String, ReportError> {
        self.render(HISTORY, &HistoryView::new(attempts, filter, self.palette))
    }

    pub fn surveys(&self, surveys: &[Survey]) -> Result<String, ReportError> {
        self.render(SURVEYS, &SurveysView::new(surveys))
    }

    pub fn profile(&self, user: &User) -> Result<String, ReportError> {
        self.render(PROFILE, &ProfileView::new(user))
    }

    pub fn question(&self, view: &QuestionView<'_>) -> Result<String, ReportError> {
        self.render(QUESTION, &QuestionPage::new(view))
    }
}

pub fn render_results(attempt: &Attempt) -> Result<String, ReportError> {
    Renderer::new()?.results(attempt)
}

pub fn render_dashboard(user: &User, attempts: &[Attempt]) -> Result<String, ReportError> {
    Renderer::new()?.dashboard(user, attempts)
}

pub fn render_history(attempts: &[Attempt], filter: HistoryFilter) -> Result<String, ReportError> {
    Renderer::new()?.history(attempts, filter)
}

pub fn render_surveys(surveys: &[Survey]) -> Result<String, ReportError> {
    Renderer::new()?.surveys(surveys)
}

pub fn render_profile(user: &User) -> Result<String, ReportError> {
    Renderer::new()?.profile(user)
}

pub fn render_question(view: &QuestionView<'_>) -> Result<String, ReportError> {
    Renderer::new()?.question(view)
}
