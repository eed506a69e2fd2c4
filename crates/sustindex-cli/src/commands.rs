use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{info, warn};

use sustindex_api::ApiClient;
use sustindex_auth::credentials::CredentialStore;
use sustindex_auth::error::AuthError;
use sustindex_auth::{AuthGate, Session};
use sustindex_core::ids::AttemptId;
use sustindex_core::models::attempt::Attempt;
use sustindex_core::models::user::{Registration, User};
use sustindex_core::stats::HistoryFilter;
use sustindex_report::docx::generate_docx;
use sustindex_report::styles::DocumentStyles;
use sustindex_report::{Palette, Renderer};

use crate::cli::{Cli, Command, ProfileArgs, RegisterArgs};
use crate::config::{self, SustindexConfig};
use crate::prompt::Prompt;
use crate::take;

/// Exit status for page commands run without a session.
const EXIT_LOGIN_REQUIRED: u8 = 2;

/// Everything a page command needs.
pub struct App {
    pub session: Session,
    pub renderer: Renderer,
    pub prompt: Prompt,
    config_dir: PathBuf,
    config: SustindexConfig,
}

pub async fn run(cli: Cli) -> eyre::Result<ExitCode> {
    let config_dir = config::config_dir()?;
    let config = config::load_or_init(&config_dir)?;
    let api_url = config::resolve_api_url(cli.api_url.as_deref(), &config);

    let client = ApiClient::new(&api_url)?.with_language(&config.language);
    let mut session = Session::new(client, CredentialStore::new(&config_dir));
    session.initialize().await;

    let palette = if std::io::stdout().is_terminal() {
        Palette::Ansi
    } else {
        Palette::Plain
    };

    let mut app = App {
        session,
        renderer: Renderer::new()?.with_palette(palette),
        prompt: Prompt::stdin(),
        config_dir,
        config,
    };

    match cli.command {
        Command::Login { username, password } => app.login(username, password).await,
        Command::Logout => app.logout(),
        Command::Register(args) => app.register(args).await,
        Command::Profile(args) => app.profile(args).await,
        Command::Surveys => app.surveys().await,
        Command::Take { survey_id } => {
            if app.require_user().is_none() {
                return Ok(login_required());
            }
            take::run(&mut app, survey_id).await
        }
        Command::Results { attempt_id, docx } => app.results(attempt_id, docx.as_deref()).await,
        Command::Dashboard => app.dashboard().await,
        Command::History { filter } => app.history(filter).await,
        Command::Config {
            set_api_url,
            set_language,
        } => app.configure(set_api_url, set_language),
    }
}

fn login_required() -> ExitCode {
    eprintln!("You need to log in first: sustindex login");
    ExitCode::from(EXIT_LOGIN_REQUIRED)
}

/// Print a user-facing failure, the terminal's stand-in for an alert box.
pub fn alert(message: impl std::fmt::Display) {
    eprintln!("! {message}");
}

impl App {
    /// The session gate every protected page passes through.
    pub fn require_user(&self) -> Option<&User> {
        match self.session.gate() {
            AuthGate::Allowed(user) => Some(user),
            AuthGate::Pending | AuthGate::RedirectToLogin => None,
        }
    }

    async fn login(
        &mut self,
        username: Option<String>,
        password: Option<String>,
    ) -> eyre::Result<ExitCode> {
        let username = match username {
            Some(u) => u,
            None => self.prompt.require("Username: ").await?,
        };
        let password = match password {
            Some(p) => p,
            None => self.prompt.require("Password: ").await?,
        };

        match self.session.login(&username, &password).await {
            Ok(user) => {
                println!("Logged in as {}.", user.display_name());
                Ok(ExitCode::SUCCESS)
            }
            Err(AuthError::AuthFailed(msg)) => {
                alert(format!("Login failed: {msg}"));
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn logout(&mut self) -> eyre::Result<ExitCode> {
        self.session.logout()?;
        println!("Logged out.");
        Ok(ExitCode::SUCCESS)
    }

    async fn register(&mut self, args: RegisterArgs) -> eyre::Result<ExitCode> {
        let password = self.prompt.require("Password: ").await?;
        let password_confirm = self.prompt.require("Confirm password: ").await?;

        let form = Registration {
            username: args.username,
            email: args.email,
            password,
            password_confirm,
            first_name: args.first_name,
            last_name: args.last_name,
            company_name: args.company_name,
            phone: args.phone,
        };

        match self.session.register(&form).await {
            Ok(user) => {
                println!("Welcome, {}! Your account is ready.", user.display_name());
                Ok(ExitCode::SUCCESS)
            }
            Err(AuthError::Validation(msg)) | Err(AuthError::AuthFailed(msg)) => {
                alert(msg);
                Ok(ExitCode::FAILURE)
            }
            Err(AuthError::Api(e)) => {
                alert(format!("Registration failed: {e}"));
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn profile(&mut self, args: ProfileArgs) -> eyre::Result<ExitCode> {
        if self.require_user().is_none() {
            return Ok(login_required());
        }

        let update = args.update();
        if !update.is_empty() {
            match self.session.update_profile(&update).await {
                Ok(_) => println!("Profile updated."),
                Err(e) => {
                    alert(format!("Failed to update profile: {e}"));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        let Some(user) = self.session.current_user() else {
            return Ok(login_required());
        };
        println!("{}", self.renderer.profile(user)?);
        Ok(ExitCode::SUCCESS)
    }

    async fn surveys(&self) -> eyre::Result<ExitCode> {
        if self.require_user().is_none() {
            return Ok(login_required());
        }

        let surveys = self
            .session
            .client()
            .list_surveys()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to load surveys");
                Vec::new()
            });

        println!("{}", self.renderer.surveys(&surveys)?);
        if !surveys.is_empty() {
            println!("Start one with: sustindex take <id>");
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Attempts for listing pages. A failed fetch shows as an empty list.
    async fn my_attempts(&self) -> Vec<Attempt> {
        self.session
            .client()
            .my_attempts()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to load attempts");
                Vec::new()
            })
    }

    async fn dashboard(&self) -> eyre::Result<ExitCode> {
        let Some(user) = self.require_user() else {
            return Ok(login_required());
        };
        let attempts = self.my_attempts().await;
        println!("{}", self.renderer.dashboard(user, &attempts)?);
        Ok(ExitCode::SUCCESS)
    }

    async fn history(&self, filter: HistoryFilter) -> eyre::Result<ExitCode> {
        if self.require_user().is_none() {
            return Ok(login_required());
        }
        let attempts = self.my_attempts().await;
        println!("{}", self.renderer.history(&attempts, filter)?);
        Ok(ExitCode::SUCCESS)
    }

    pub async fn results(&self, id: AttemptId, docx: Option<&Path>) -> eyre::Result<ExitCode> {
        if self.require_user().is_none() {
            return Ok(login_required());
        }

        let attempt = match self.session.client().attempt(id).await {
            Ok(attempt) => attempt,
            Err(e) => {
                warn!(attempt_id = %id, error = %e, "failed to load results");
                alert(format!("Failed to load results for attempt {id}"));
                return Ok(ExitCode::FAILURE);
            }
        };

        println!("{}", self.renderer.results(&attempt)?);

        if let Some(path) = docx {
            export_docx(&attempt, path).await?;
            println!("Exported to {}", path.display());
        }
        Ok(ExitCode::SUCCESS)
    }

    fn configure(
        &mut self,
        set_api_url: Option<String>,
        set_language: Option<String>,
    ) -> eyre::Result<ExitCode> {
        let mut changed = false;
        if let Some(url) = set_api_url {
            // Validate before persisting.
            ApiClient::new(&url)?;
            self.config.api_url = url;
            info!(api_url = %self.config.api_url, "api url updated");
            changed = true;
        }
        if let Some(language) = set_language {
            let language = language.trim();
            if language.is_empty() {
                return Err(eyre::eyre!("language code must not be empty"));
            }
            self.config.language = language.to_string();
            info!(language = %self.config.language, "language updated");
            changed = true;
        }
        if changed {
            config::save_config(&self.config_dir, &self.config)?;
        }

        println!("Config file: {}", config::config_path(&self.config_dir).display());
        println!("API URL:     {}", self.config.api_url);
        println!("Language:    {}", self.config.language);
        Ok(ExitCode::SUCCESS)
    }
}

async fn export_docx(attempt: &Attempt, path: &Path) -> eyre::Result<()> {
    let rendered = Renderer::new()?.results(attempt)?;
    let bytes = generate_docx(&rendered, &DocumentStyles::default())?;
    tokio::fs::write(path, bytes).await?;
    info!(attempt_id = %attempt.id, path = %path.display(), "results exported");
    Ok(())
}
