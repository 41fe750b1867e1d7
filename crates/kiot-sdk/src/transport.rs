//! Blocking HTTP transport.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Status and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// The two HTTP calls the tools make. `Err` means no response arrived.
pub trait Transport {
    /// POST an `application/x-www-form-urlencoded` body.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply>;

    /// GET with extra headers and query parameters.
    fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        query: &[(String, String)],
    ) -> Result<HttpReply>;
}

/// [`Transport`] backed by a blocking reqwest client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client; `None` keeps reqwest's default timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .with_context(|| format!("POST {} failed", url))?;

        let status = response.status().as_u16();
        let body = response.text().context("Failed to read response body")?;
        Ok(HttpReply { status, body })
    }

    fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        query: &[(String, String)],
    ) -> Result<HttpReply> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request
            .send()
            .with_context(|| format!("GET {} failed", url))?;

        let status = response.status().as_u16();
        let body = response.text().context("Failed to read response body")?;
        Ok(HttpReply { status, body })
    }
}
