use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::AuthError;

/// Seconds before `exp` at which a token is already treated as expired, so
/// it does not lapse between the check and the request.
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Claims carried by the backend's access and refresh tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Read the claims of a token without verifying its signature.
///
/// The signing key never leaves the backend; the client only needs `exp` to
/// decide whether to refresh before calling it.
pub fn claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(AuthError::InvalidToken(
                "expected three dot-separated segments".to_string(),
            ));
        }
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Whether `token` is expired (or unreadable) at `now`.
pub fn is_expired(token: &str, now: jiff::Timestamp) -> bool {
    match claims(token) {
        Ok(c) => c.exp <= now.as_second() + EXPIRY_LEEWAY_SECS,
        Err(_) => true,
    }
}
