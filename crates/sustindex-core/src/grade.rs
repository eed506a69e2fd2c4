use serde::{Deserialize, Serialize};

/// Visual treatment for a letter grade.
///
/// Only the first character of the grade matters, so `A+`, `A` and `A-`
/// all share a tone. Every page that shows a grade goes through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTone {
    Success,
    Accent,
    Warning,
    Failing,
}

impl GradeTone {
    pub fn for_grade(grade: &str) -> Self {
        match grade.trim_start().chars().next() {
            Some('A') => GradeTone::Success,
            Some('B') => GradeTone::Accent,
            Some('C') => GradeTone::Warning,
            _ => GradeTone::Failing,
        }
    }

    /// Class name for grade text.
    pub fn text_class(&self) -> &'static str {
        match self {
            GradeTone::Success => "text-success",
            GradeTone::Accent => "text-accent",
            GradeTone::Warning => "text-warning",
            GradeTone::Failing => "text-red-500",
        }
    }

    /// Class name for a filled grade badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            GradeTone::Success => "bg-success",
            GradeTone::Accent => "bg-accent",
            GradeTone::Warning => "bg-warning",
            GradeTone::Failing => "bg-red-500",
        }
    }

    /// ANSI SGR colour code used by the terminal renderer.
    pub fn ansi_code(&self) -> u8 {
        match self {
            GradeTone::Success => 32,
            GradeTone::Accent => 36,
            GradeTone::Warning => 33,
            GradeTone::Failing => 31,
        }
    }
}
