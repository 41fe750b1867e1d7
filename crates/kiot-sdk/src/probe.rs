//! Endpoint probing with `Retailer` header candidates.

use kiot_core::text::truncate;
use kiot_core::{Endpoint, RetailerCandidates};
use serde_json::Value;

use crate::auth::Session;
use crate::config::Config;
use crate::transport::{HttpReply, Transport};

/// Default characters of a failed response body kept per attempt.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// One request for one `(endpoint, retailer candidate)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// `Retailer` header value sent, if any.
    pub retailer: Option<String>,
    /// HTTP status; `None` when the request never got a response.
    pub status: Option<u16>,
    /// Transport or decode error text.
    pub error: Option<String>,
    /// Truncated response body of a failed attempt.
    pub excerpt: Option<String>,
    /// Rejected with 400/401 while no `Retailer` header was sent.
    pub retailer_header_hint: bool,
}

impl Attempt {
    pub fn succeeded(&self) -> bool {
        self.status == Some(200) && self.error.is_none()
    }
}

/// Accepted response for an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSuccess {
    pub retailer: Option<String>,
    pub payload: Value,
}

/// Outcome of probing a single endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub endpoint: Endpoint,
    pub attempts: Vec<Attempt>,
    pub success: Option<ProbeSuccess>,
}

impl ProbeResult {
    pub fn payload(&self) -> Option<&Value> {
        self.success.as_ref().map(|s| &s.payload)
    }

    /// Candidate that produced the accepted response. The outer `Option`
    /// is `None` when nothing succeeded.
    pub fn accepted_retailer(&self) -> Option<Option<&str>> {
        self.success.as_ref().map(|s| s.retailer.as_deref())
    }
}

/// Results for a run over an endpoint table, in probe order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    pub fn push(&mut self, result: ProbeResult) {
        self.results.push(result);
    }

    /// `(label, payload)` for every endpoint that returned data.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.results
            .iter()
            .filter_map(|r| r.payload().map(|payload| (r.endpoint.label, payload)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }
}

/// Issues authenticated GETs, trying each retailer candidate in order.
pub struct EndpointProber<'a, T: Transport + ?Sized> {
    transport: &'a T,
    base_url: String,
    bearer: String,
    candidates: RetailerCandidates,
    page_size: Option<u32>,
    excerpt_chars: usize,
}

impl<'a, T: Transport + ?Sized> EndpointProber<'a, T> {
    pub fn new(
        transport: &'a T,
        config: &Config,
        session: &Session,
        candidates: RetailerCandidates,
    ) -> Self {
        Self {
            transport,
            base_url: config.api_url.clone(),
            bearer: session.bearer(),
            candidates,
            page_size: None,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }

    /// Replace each endpoint's default `pageSize`.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }

    /// Probe every endpoint of `endpoints` in order. `on_result` sees each
    /// result as soon as its endpoint is done.
    pub fn probe_all<F>(&self, endpoints: &[Endpoint], mut on_result: F) -> ProbeReport
    where
        F: FnMut(&ProbeResult),
    {
        let mut report = ProbeReport::default();
        for endpoint in endpoints {
            let result = self.probe(endpoint);
            on_result(&result);
            report.push(result);
        }
        report
    }

    /// Try candidates in order and stop at the first HTTP 200 with a
    /// non-empty JSON body.
    pub fn probe(&self, endpoint: &Endpoint) -> ProbeResult {
        let url = endpoint.url(&self.base_url);
        let query = endpoint.query(self.page_size);
        let mut attempts = Vec::new();

        for retailer in self.candidates.iter() {
            let (attempt, payload) = self.attempt(&url, &query, retailer);
            attempts.push(attempt);

            if let Some(payload) = payload {
                tracing::info!(
                    endpoint = endpoint.path,
                    retailer = retailer.unwrap_or("<none>"),
                    "Endpoint returned data"
                );
                return ProbeResult {
                    endpoint: *endpoint,
                    attempts,
                    success: Some(ProbeSuccess {
                        retailer: retailer.map(str::to_string),
                        payload,
                    }),
                };
            }
        }

        tracing::debug!(
            endpoint = endpoint.path,
            attempts = attempts.len(),
            "No retailer candidate succeeded"
        );
        ProbeResult {
            endpoint: *endpoint,
            attempts,
            success: None,
        }
    }

    fn attempt(
        &self,
        url: &str,
        query: &[(String, String)],
        retailer: Option<&str>,
    ) -> (Attempt, Option<Value>) {
        let mut headers = vec![
            ("Authorization", self.bearer.clone()),
            ("Content-Type", "application/json".to_string()),
        ];
        if let Some(name) = retailer {
            headers.push(("Retailer", name.to_string()));
        }

        let mut attempt = Attempt {
            retailer: retailer.map(str::to_string),
            status: None,
            error: None,
            excerpt: None,
            retailer_header_hint: false,
        };

        tracing::debug!(url, retailer = retailer.unwrap_or("<none>"), "GET");
        let reply = match self.transport.get(url, &headers, query) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::debug!(url, error = %err, "Request error");
                attempt.error = Some(format!("{:#}", err));
                return (attempt, None);
            }
        };
        attempt.status = Some(reply.status);

        if reply.is_ok() {
            return match serde_json::from_str::<Value>(&reply.body) {
                Ok(payload) if is_empty_payload(&payload) => {
                    attempt.error = Some(format!("empty JSON payload: {}", payload));
                    (attempt, None)
                }
                Ok(payload) => (attempt, Some(payload)),
                Err(err) => {
                    attempt.error = Some(format!("invalid JSON body: {}", err));
                    attempt.excerpt = Some(truncate(&reply.body, self.excerpt_chars));
                    (attempt, None)
                }
            };
        }

        attempt.retailer_header_hint = needs_retailer_header(&reply, retailer);
        if attempt.retailer_header_hint {
            tracing::warn!(
                url,
                status = reply.status,
                "Request rejected without a Retailer header; the tenant may require one"
            );
        }
        attempt.excerpt = Some(truncate(&reply.body, self.excerpt_chars));
        (attempt, None)
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` carry no data.
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn needs_retailer_header(reply: &HttpReply, retailer: Option<&str>) -> bool {
    retailer.is_none() && matches!(reply.status, 400 | 401)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_hint_only_without_retailer() {
        let rejected = HttpReply::new(401, "");
        assert!(needs_retailer_header(&rejected, None));
        assert!(!needs_retailer_header(&rejected, Some("shop")));
        assert!(!needs_retailer_header(&HttpReply::new(403, ""), None));
        assert!(needs_retailer_header(&HttpReply::new(400, ""), None));
    }

    #[test]
    fn empty_payloads_carry_no_data() {
        for body in ["null", "false", "0", "\"\"", "[]", "{}"] {
            let payload: Value = serde_json::from_str(body).unwrap();
            assert!(is_empty_payload(&payload), "{} should be empty", body);
        }
        for body in ["true", "1", "\"x\"", "[0]", r#"{"data":[]}"#] {
            let payload: Value = serde_json::from_str(body).unwrap();
            assert!(!is_empty_payload(&payload), "{} should carry data", body);
        }
    }
}
