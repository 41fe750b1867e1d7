//! Configuration from environment.

use std::env;

use kiot_core::Credentials;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "https://public.kiotapi.com";
pub const DEFAULT_TOKEN_URL: &str = "https://id.kiotviet.vn/connect/token";
pub const TOKEN_SCOPE: &str = "PublicApi.Access";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub token_url: String,
    pub scope: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scope: TOKEN_SCOPE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_empty_var("KIOTVIET_API_URL").unwrap_or(defaults.api_url),
            token_url: non_empty_var("KIOTVIET_TOKEN_URL").unwrap_or(defaults.token_url),
            scope: defaults.scope,
        }
    }
}

/// Load `CLIENT_ID` and `SECRET_KEY`, stripped of stray quotes.
pub fn credentials_from_env() -> Result<Credentials, ApiError> {
    let client_id = env::var("CLIENT_ID").unwrap_or_default();
    let client_secret = env::var("SECRET_KEY").unwrap_or_default();
    let credentials = Credentials::new(&client_id, &client_secret);

    if credentials.client_id().is_empty() {
        return Err(ApiError::MissingCredential("CLIENT_ID"));
    }
    if credentials.client_secret().is_empty() {
        return Err(ApiError::MissingCredential("SECRET_KEY"));
    }
    tracing::debug!(client_id = %credentials.masked_client_id(), "Loaded credentials");
    Ok(credentials)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
