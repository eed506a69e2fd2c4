use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sustindex_core::ids::{AttemptId, SurveyId};
use sustindex_core::models::user::ProfileUpdate;
use sustindex_core::stats::HistoryFilter;

#[derive(Debug, Parser)]
#[command(name = "sustindex")]
#[command(version, about = "Sustainability index self-assessment client")]
#[command(
    after_help = "Environment:\n  SUSTINDEX_API_URL      Backend base URL\n  SUSTINDEX_CONFIG_DIR   Config and credential directory\n  RUST_LOG               Log filter (default: info)"
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub log_json: bool,

    /// Backend base URL, e.g. http://localhost:8000/api/
    #[arg(long, global = true, env = "SUSTINDEX_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session.
    Login {
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, env = "SUSTINDEX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Create an account, then log in.
    Register(RegisterArgs),
    /// Show the profile, or update it with any of the field flags.
    #[command(alias = "whoami")]
    Profile(ProfileArgs),
    /// List available surveys.
    Surveys,
    /// Answer a survey interactively.
    Take { survey_id: SurveyId },
    /// Show the results of an attempt.
    Results {
        attempt_id: AttemptId,
        /// Also write the results page to a DOCX file.
        #[arg(long)]
        docx: Option<PathBuf>,
    },
    Dashboard,
    History {
        /// all, completed or in-progress
        #[arg(long, default_value = "all")]
        filter: HistoryFilter,
    },
    /// Show or change the stored configuration.
    Config {
        #[arg(long)]
        set_api_url: Option<String>,
        /// Language code the backend should answer in, e.g. `tr`.
        #[arg(long)]
        set_language: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long, short)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub company_name: String,
    #[arg(long, default_value = "")]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl ProfileArgs {
    pub fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            company_name: self.company_name.clone(),
            phone: self.phone.clone(),
        }
    }
}
