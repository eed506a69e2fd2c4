//! sustindex-report
//!
//! Page rendering for the terminal client (results, dashboard, history,
//! surveys, profile and the questionnaire screen) through embedded Tera
//! templates, plus DOCX export of a rendered results page.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
pub mod text;
pub mod views;

pub use render::{
    Renderer, render_dashboard, render_history, render_profile, render_question,
    render_results, render_surveys,
};
pub use views::{Palette, PendingFileView, QuestionView};
