use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use sustindex_core::models::user::{ProfileUpdate, Registration, User};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Access/refresh pair issued by `auth/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    /// Only present when the backend rotates refresh tokens.
    #[serde(default)]
    refresh: Option<String>,
}

impl ApiClient {
    /// Exchange username/password for a token pair.
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        info!(username, "requesting token pair");
        self.send_json(
            Method::POST,
            "auth/token/",
            &Credentials { username, password },
        )
        .await
    }

    /// Trade a refresh token for a new access token. The refresh token is
    /// kept unless the backend rotated it.
    pub async fn refresh_token(&self, refresh: &str) -> Result<TokenPair, ApiError> {
        let resp: RefreshResponse = self
            .send_json(
                Method::POST,
                "auth/token/refresh/",
                &RefreshRequest { refresh },
            )
            .await?;
        Ok(TokenPair {
            access: resp.access,
            refresh: resp.refresh.unwrap_or_else(|| refresh.to_string()),
        })
    }

    /// The user the current token belongs to.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("users/me/").await
    }

    pub async fn register(&self, form: &Registration) -> Result<User, ApiError> {
        info!(username = %form.username, "registering account");
        self.send_json(Method::POST, "users/register/", form).await
    }

    pub async fn update_profile(&self, user: &User, update: &ProfileUpdate) -> Result<User, ApiError> {
        info!(user_id = %user.id, "updating profile");
        self.send_json(Method::PATCH, &format!("users/{}/", user.id), update)
            .await
    }
}
