//! Command line options shared by both tools.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use kiot_sdk::{Config, HttpTransport};

/// Where to connect and how to page.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL (default: $KIOTVIET_API_URL or https://public.kiotapi.com)
    #[arg(long)]
    pub base_url: Option<String>,

    /// OAuth token URL (default: $KIOTVIET_TOKEN_URL or https://id.kiotviet.vn/connect/token)
    #[arg(long)]
    pub token_url: Option<String>,

    /// Override pageSize on every paged endpoint
    #[arg(long)]
    pub page_size: Option<u32>,

    /// HTTP timeout in seconds (default: client default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Retailer name from a typed line, falling back to `hint` when blank.
pub fn choose_retailer(input: &str, hint: Option<&str>) -> Option<String> {
    let typed = input.trim();
    if !typed.is_empty() {
        return Some(typed.to_string());
    }
    hint.map(str::trim)
        .filter(|hint| !hint.is_empty())
        .map(str::to_string)
}

impl ConnectionArgs {
    /// Environment config with command line overrides applied.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(url) = &self.base_url {
            config.api_url = url.clone();
        }
        if let Some(url) = &self.token_url {
            config.token_url = url.clone();
        }
        config
    }

    pub fn transport(&self) -> Result<HttpTransport> {
        HttpTransport::new(self.timeout_secs.map(Duration::from_secs))
    }
}
