use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::error::{Result, SpypointError};

/// mutable authentication state for one api client: the credentials, the
/// request headers, and the lifetime of the current bearer token. nothing
/// outside the session manager code paths touches these.
pub(crate) struct Session {
    username: String,
    password: String,
    headers: HeaderMap,
    token: Option<String>,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn new(username: &str, password: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Session {
            username: username.to_string(),
            password: password.to_string(),
            headers,
            token: None,
            // already expired, the first call has to log in
            expires_at: Utc::now() - Duration::seconds(1),
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    /// body for the login endpoint
    pub(crate) fn login_body(&self) -> Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password,
        })
    }

    pub(crate) fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// adopt a freshly issued bearer token, taking its lifetime from the
    /// expiry claim
    pub(crate) fn store_token(&mut self, token: &str) -> Result<()> {
        let expires_at = token_expiry(token)?;

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            SpypointError::InvalidResponse("token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);

        self.headers.insert(AUTHORIZATION, value);
        self.token = Some(token.to_string());
        self.expires_at = expires_at;
        debug!("session authenticated, token valid until {}", expires_at);
        Ok(())
    }

    /// evict the token so the next call is forced through a fresh login.
    /// used when the server stops accepting a token the local clock still
    /// considers valid.
    pub(crate) fn invalidate(&mut self) {
        self.headers.remove(AUTHORIZATION);
        self.token = None;
        self.expires_at = Utc::now() - Duration::seconds(1);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// read the expiry claim out of a vendor issued jwt. the signature is not
/// checked: the token arrived over the authenticated channel and is handed
/// straight back to the issuer, only the expiry matters here. a plain
/// base64url decode of the claims segment keeps that explicit.
fn token_expiry(token: &str) -> Result<DateTime<Utc>> {
    let claims = token
        .split('.')
        .nth(1)
        .ok_or_else(|| SpypointError::InvalidResponse("token has no claims segment".to_string()))?;

    let decoded = base64::decode_config(claims.trim_end_matches('='), base64::URL_SAFE_NO_PAD)
        .map_err(|err| {
            SpypointError::InvalidResponse(format!("token claims are not base64: {}", err))
        })?;
    let claims: Value = serde_json::from_slice(&decoded)?;

    let exp = claims
        .get("exp")
        .and_then(Value::as_i64)
        .ok_or_else(|| SpypointError::InvalidResponse("token claims carry no exp".to_string()))?;

    Utc.timestamp_opt(exp, 0)
        .single()
        .ok_or_else(|| SpypointError::InvalidResponse("token exp is out of range".to_string()))
}
