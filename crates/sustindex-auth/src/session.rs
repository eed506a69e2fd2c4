use tracing::{info, warn};

use sustindex_api::ApiClient;
use sustindex_api::auth::TokenPair;
use sustindex_api::error::ApiError;
use sustindex_core::models::user::{ProfileUpdate, Registration, User};

use crate::credentials::{CredentialStore, StoredCredential};
use crate::error::AuthError;
use crate::jwt;

/// Who is using the app right now.
///
/// `Loading` and `Anonymous` are different answers: pages wait on the first
/// and send the visitor to the login page on the second.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Anonymous,
    Authenticated(User),
}

/// What a page that requires a login should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthGate<'a> {
    /// The session is still resolving; render nothing yet.
    Pending,
    RedirectToLogin,
    Allowed(&'a User),
}

/// Session holder passed to every page.
///
/// Owns the API client used for authenticated calls and the credential
/// store backing it. Starts in [`SessionState::Loading`] until
/// [`Session::initialize`] has looked at the stored credential.
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
    store: CredentialStore,
    state: SessionState,
}

impl Session {
    pub fn new(client: ApiClient, store: CredentialStore) -> Self {
        Self {
            client,
            store,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn gate(&self) -> AuthGate<'_> {
        match &self.state {
            SessionState::Loading => AuthGate::Pending,
            SessionState::Anonymous => AuthGate::RedirectToLogin,
            SessionState::Authenticated(user) => AuthGate::Allowed(user),
        }
    }

    /// The client pages use for their own calls; carries the bearer token
    /// once logged in.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Resolve the session from the stored credential.
    ///
    /// An expired access token is refreshed once. Any authentication failure
    /// clears the credential and resolves to anonymous; transport failures
    /// resolve to anonymous but keep the credential for the next run.
    pub async fn initialize(&mut self) -> &SessionState {
        self.state = SessionState::Loading;

        let stored = match self.store.load() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                self.state = SessionState::Anonymous;
                return &self.state;
            }
            Err(e) => {
                warn!(error = %e, "stored credential unreadable, discarding");
                self.forget_credential();
                self.state = SessionState::Anonymous;
                return &self.state;
            }
        };

        let stored = if jwt::is_expired(&stored.access, jiff::Timestamp::now()) {
            match self.client.refresh_token(&stored.refresh).await {
                Ok(pair) => {
                    info!("access token refreshed");
                    let refreshed = StoredCredential {
                        access: pair.access,
                        refresh: pair.refresh,
                        username: stored.username,
                        saved_at: jiff::Timestamp::now(),
                    };
                    if let Err(e) = self.store.save(&refreshed) {
                        warn!(error = %e, "failed to persist refreshed credential");
                    }
                    refreshed
                }
                Err(e) => {
                    warn!(error = %e, "token refresh failed");
                    if e.is_unauthorized() {
                        self.forget_credential();
                    }
                    self.state = SessionState::Anonymous;
                    return &self.state;
                }
            }
        } else {
            stored
        };

        self.client.set_token(stored.access);
        match self.client.me().await {
            Ok(user) => {
                info!(user_id = %user.id, "session restored");
                self.state = SessionState::Authenticated(user);
            }
            Err(e) => {
                warn!(error = %e, "failed to load current user");
                self.client.clear_token();
                if e.is_unauthorized() {
                    self.forget_credential();
                }
                self.state = SessionState::Anonymous;
            }
        }
        &self.state
    }

    /// Log in with username and password, persisting the token pair.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User, AuthError> {
        let pair = match self.client.obtain_token(username, password).await {
            Ok(pair) => pair,
            Err(ApiError::Unauthorized(msg)) => {
                self.state = SessionState::Anonymous;
                return Err(AuthError::AuthFailed(msg));
            }
            Err(e) => {
                self.state = SessionState::Anonymous;
                return Err(e.into());
            }
        };
        self.establish(pair, Some(username.to_string())).await
    }

    /// Create an account, then log straight into it.
    pub async fn register(&mut self, form: &Registration) -> Result<&User, AuthError> {
        form.validate().map_err(AuthError::Validation)?;
        let created = self.client.register(form).await?;
        info!(user_id = %created.id, "account registered");
        self.login(&form.username, &form.password).await
    }

    /// Drop the identity, the bearer token and the stored credential.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.current_user() {
            info!(user_id = %user.id, "logging out");
        }
        self.state = SessionState::Anonymous;
        self.client.clear_token();
        self.store.clear()
    }

    /// Send a profile update and hold on to the user the backend returns.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<&User, AuthError> {
        let user = self.current_user().ok_or(AuthError::NotLoggedIn)?;
        let updated = self.client.update_profile(user, update).await?;
        self.state = SessionState::Authenticated(updated);
        self.current_user().ok_or(AuthError::NotLoggedIn)
    }

    async fn establish(&mut self, pair: TokenPair, username: Option<String>) -> Result<&User, AuthError> {
        self.client.set_token(pair.access.clone());
        let user = match self.client.me().await {
            Ok(user) => user,
            Err(e) => {
                self.client.clear_token();
                self.state = SessionState::Anonymous;
                return Err(e.into());
            }
        };

        self.store.save(&StoredCredential {
            access: pair.access,
            refresh: pair.refresh,
            username,
            saved_at: jiff::Timestamp::now(),
        })?;

        info!(user_id = %user.id, "logged in");
        self.state = SessionState::Authenticated(user);
        self.current_user().ok_or(AuthError::NotLoggedIn)
    }

    fn forget_credential(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored credential");
        }
    }
}
