//! OAuth client-credentials token exchange.
//!
//! One attempt per run: the token lives longer than any probe session, so
//! there is no refresh and no retry.

use chrono::{DateTime, Duration, Utc};
use kiot_core::credentials::prefix_chars;
use kiot_core::Credentials;
use serde::Deserialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Bearer token obtained from the token endpoint.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    token_type: Option<String>,
    expires_in: Option<u64>,
    issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in,
            issued_at: Utc::now(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn expires_in_hours(&self) -> Option<f64> {
        self.expires_in.map(|secs| secs as f64 / 3600.0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.expires_in?).ok()?;
        self.issued_at.checked_add_signed(Duration::try_seconds(secs)?)
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Leading characters of the token, for logs.
    pub fn token_preview(&self) -> String {
        format!("{}...", prefix_chars(&self.access_token, 20))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.token_preview())
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// Performs the client-credentials exchange and holds the resulting session.
pub struct Authenticator<'a, T: Transport + ?Sized> {
    transport: &'a T,
    token_url: String,
    scope: String,
    credentials: Credentials,
    session: Option<Session>,
}

impl<'a, T: Transport + ?Sized> Authenticator<'a, T> {
    pub fn new(transport: &'a T, config: &Config, credentials: Credentials) -> Self {
        Self {
            transport,
            token_url: config.token_url.clone(),
            scope: config.scope.clone(),
            credentials,
            session: None,
        }
    }

    /// Session from the last successful exchange.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(Session::access_token)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Anything but HTTP 200 with an `access_token` leaves no session behind.
    pub fn authenticate(&mut self) -> Result<&Session, ApiError> {
        self.session = None;

        let form = [
            ("scopes", self.scope.as_str()),
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
        ];

        tracing::debug!(url = %self.token_url, client_id = %self.credentials.masked_client_id(), "Requesting access token");
        let reply = self.transport.post_form(&self.token_url, &form)?;

        if !reply.is_ok() {
            tracing::warn!(status = reply.status, "Token request rejected");
            return Err(ApiError::AuthRejected {
                status: reply.status,
                body: reply.body,
            });
        }

        let payload: TokenResponse = serde_json::from_str(&reply.body)?;
        let access_token = payload
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingAccessToken)?;

        let session = Session {
            access_token,
            token_type: payload.token_type,
            expires_in: payload.expires_in,
            issued_at: Utc::now(),
        };
        tracing::info!(
            token_type = ?session.token_type,
            expires_in = ?session.expires_in,
            "Authenticated"
        );

        Ok(self.session.insert(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_helpers() {
        let session = Session::new("abc", Some(7200));
        assert_eq!(session.expires_in_hours(), Some(2.0));
        let expires_at = session.expires_at().unwrap();
        assert_eq!((expires_at - session.issued_at).num_seconds(), 7200);
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn missing_expiry_is_none() {
        let session = Session::new("abc", None);
        assert_eq!(session.expires_at(), None);
        assert_eq!(session.expires_in_hours(), None);
    }

    #[test]
    fn debug_shows_only_token_preview() {
        let token = "x".repeat(64);
        let session = Session::new(token.clone(), Some(60));
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains(&token));
        assert!(rendered.contains(&format!("{}...", "x".repeat(20))));
    }
}
