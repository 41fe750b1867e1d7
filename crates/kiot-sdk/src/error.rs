//! Errors surfaced by the SDK.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("environment variable {0} is missing or empty")]
    MissingCredential(&'static str),
    #[error("authentication failed with status {status}: {body}")]
    AuthRejected { status: u16, body: String },
    #[error("token response has no access_token")]
    MissingAccessToken,
    #[error("token response is not valid JSON: {0}")]
    InvalidTokenResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ApiError {
    /// Response body of a rejected token request, for diagnostics.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ApiError::AuthRejected { body, .. } => Some(body),
            _ => None,
        }
    }
}
