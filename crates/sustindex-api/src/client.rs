use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use sustindex_core::listing::Listing;

use crate::error::ApiError;

/// Longest slice of an unstructured error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client bound to one backend base URL and, once logged in, one
/// bearer token. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    language: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000/api/`).
    /// A missing trailing slash is added so relative joins stay under it.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
            language: None,
        })
    }

    /// Ask the backend for messages in `language` (sent as
    /// `Accept-Language`). Blank means the backend default.
    pub fn with_language(mut self, language: &str) -> Self {
        let language = language.trim();
        self.language = (!language.is_empty()).then(|| language.to_string());
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        debug!(%method, %url, "backend request");
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(language) = &self.language {
            req = req.header(ACCEPT_LANGUAGE, language);
        }
        Ok(req)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path)?.send().await?;
        decode(resp).await
    }

    /// GET a collection endpoint. A body of an unexpected shape reads as an
    /// empty collection.
    pub(crate) async fn get_listing<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let listing: Listing<T> = self.get_json(path).await?;
        if !listing.is_recognized() {
            warn!(path, "unexpected listing shape, treating as empty");
        }
        Ok(listing.into_items())
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.request(method, path)?.json(body).send().await?;
        decode(resp).await
    }
}

/// Turn a non-2xx response into the matching [`ApiError`].
pub(crate) async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body);
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        other => ApiError::Status {
            status: other.as_u16(),
            message,
        },
    })
}

pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = check(resp).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Pull the human-readable message out of an error body.
///
/// The backend answers with `{"error": ".."}` from its own actions and
/// `{"detail": ".."}` from the framework; anything else is passed through,
/// truncated.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "detail"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
