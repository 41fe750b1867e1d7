//! Authenticator and prober tests against a scripted transport.
//!
//! The live test at the bottom needs CLIENT_ID / SECRET_KEY and network:
//! cargo test -p kiot-sdk --test probe_test -- --ignored

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use kiot_core::{Credentials, RetailerCandidates, PROBE_ENDPOINTS};
use kiot_sdk::{ApiError, Authenticator, Config, EndpointProber, HttpReply, Session, Transport};
use serde_json::json;

#[derive(Debug, Clone)]
struct RecordedGet {
    url: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpReply>>>,
    forms: RefCell<Vec<(String, Vec<(String, String)>)>>,
    gets: RefCell<Vec<RecordedGet>>,
}

impl ScriptedTransport {
    fn with_replies(replies: Vec<Result<HttpReply>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            ..Default::default()
        }
    }

    fn next_reply(&self) -> Result<HttpReply> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("script exhausted")))
    }

    fn retailer_headers(&self) -> Vec<Option<String>> {
        self.gets
            .borrow()
            .iter()
            .map(|get| {
                get.headers
                    .iter()
                    .find(|(name, _)| name == "Retailer")
                    .map(|(_, value)| value.clone())
            })
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply> {
        self.forms.borrow_mut().push((
            url.to_string(),
            form.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        self.next_reply()
    }

    fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        query: &[(String, String)],
    ) -> Result<HttpReply> {
        self.gets.borrow_mut().push(RecordedGet {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            query: query.to_vec(),
        });
        self.next_reply()
    }
}

fn credentials() -> Credentials {
    Credentials::new("\"client-0123456789\"", "'secret'")
}

fn session() -> Session {
    Session::new("tok", Some(86400))
}

fn candidates() -> RetailerCandidates {
    RetailerCandidates::with_bare_request(["taphoaxyz", "store", "shop"])
}

#[test]
fn successful_exchange_exposes_exact_token() {
    let transport = ScriptedTransport::with_replies(vec![Ok(HttpReply::new(
        200,
        json!({
            "access_token": "eyJ.abc.def",
            "token_type": "Bearer",
            "expires_in": 86400
        })
        .to_string(),
    ))]);
    let config = Config::default();
    let mut auth = Authenticator::new(&transport, &config, credentials());

    let session = auth.authenticate().expect("authenticate");
    assert_eq!(session.access_token(), "eyJ.abc.def");
    assert_eq!(session.token_type(), Some("Bearer"));
    assert_eq!(session.expires_in(), Some(86400));
    assert_eq!(auth.access_token(), Some("eyJ.abc.def"));

    let forms = transport.forms.borrow();
    let (url, form) = &forms[0];
    assert_eq!(url, "https://id.kiotviet.vn/connect/token");
    let field = |name: &str| {
        form.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(field("scopes"), Some("PublicApi.Access"));
    assert_eq!(field("grant_type"), Some("client_credentials"));
    assert_eq!(field("client_id"), Some("client-0123456789"));
    assert_eq!(field("client_secret"), Some("secret"));
}

#[test]
fn rejected_exchange_sets_no_token() {
    let transport = ScriptedTransport::with_replies(vec![Ok(HttpReply::new(
        400,
        r#"{"error":"invalid_client"}"#,
    ))]);
    let config = Config::default();
    let mut auth = Authenticator::new(&transport, &config, credentials());

    let err = auth.authenticate().unwrap_err();
    match &err {
        ApiError::AuthRejected { status, body } => {
            assert_eq!(*status, 400);
            assert!(body.contains("invalid_client"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.response_body(), Some(r#"{"error":"invalid_client"}"#));
    assert!(auth.session().is_none());
    assert!(auth.access_token().is_none());
}

#[test]
fn transport_failure_is_an_auth_error() {
    let transport =
        ScriptedTransport::with_replies(vec![Err(anyhow!("connection refused"))]);
    let config = Config::default();
    let mut auth = Authenticator::new(&transport, &config, credentials());

    assert!(matches!(auth.authenticate(), Err(ApiError::Transport(_))));
    assert!(auth.access_token().is_none());
}

#[test]
fn ok_without_access_token_is_rejected() {
    let transport = ScriptedTransport::with_replies(vec![Ok(HttpReply::new(
        200,
        r#"{"token_type":"Bearer"}"#,
    ))]);
    let config = Config::default();
    let mut auth = Authenticator::new(&transport, &config, credentials());

    assert!(matches!(auth.authenticate(), Err(ApiError::MissingAccessToken)));
    assert!(auth.session().is_none());
}

#[test]
fn prober_stops_at_first_ok_candidate() {
    let transport = ScriptedTransport::with_replies(vec![
        Ok(HttpReply::new(401, "unauthorized")),
        Ok(HttpReply::new(400, "bad retailer")),
        Ok(HttpReply::new(200, r#"{"data":[{"id":1}],"total":1}"#)),
    ]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates());

    let result = prober.probe(&PROBE_ENDPOINTS[1]);

    assert_eq!(result.accepted_retailer(), Some(Some("store")));
    assert_eq!(result.attempts.len(), 3);
    assert!(result.attempts[0].retailer_header_hint);
    assert!(!result.attempts[1].retailer_header_hint);
    assert!(result.attempts[2].succeeded());
    assert_eq!(result.payload().unwrap()["total"], json!(1));

    // "shop" is never tried.
    assert_eq!(
        transport.retailer_headers(),
        vec![None, Some("taphoaxyz".to_string()), Some("store".to_string())]
    );

    let gets = transport.gets.borrow();
    assert_eq!(gets[0].url, "https://public.kiotapi.com/products");
    assert!(gets[0]
        .headers
        .contains(&("Authorization".to_string(), "Bearer tok".to_string())));
    assert_eq!(
        gets[0].query,
        vec![
            ("pageSize".to_string(), "5".to_string()),
            ("currentItem".to_string(), "0".to_string()),
        ]
    );
}

#[test]
fn prober_reports_no_success_when_all_candidates_fail() {
    let transport = ScriptedTransport::with_replies(vec![
        Ok(HttpReply::new(401, "no")),
        Err(anyhow!("timed out")),
        Ok(HttpReply::new(200, "<html>not json</html>")),
        Ok(HttpReply::new(500, "x".repeat(40))),
    ]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates())
        .with_excerpt_chars(10);

    let result = prober.probe(&PROBE_ENDPOINTS[0]);

    assert!(result.success.is_none());
    assert_eq!(result.accepted_retailer(), None);
    assert_eq!(result.attempts.len(), 4);
    assert_eq!(result.attempts[1].status, None);
    assert!(result.attempts[1].error.as_deref().unwrap().contains("timed out"));
    assert_eq!(result.attempts[2].status, Some(200));
    assert!(!result.attempts[2].succeeded());
    assert_eq!(
        result.attempts[3].excerpt.as_deref(),
        Some("xxxxxxxxxx...")
    );
}

#[test]
fn empty_ok_body_moves_to_next_candidate() {
    let transport = ScriptedTransport::with_replies(vec![
        Ok(HttpReply::new(200, "[]")),
        Ok(HttpReply::new(200, "{}")),
        Ok(HttpReply::new(200, r#"{"data":[{"id":7}]}"#)),
    ]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates());

    let result = prober.probe(&PROBE_ENDPOINTS[3]);

    assert_eq!(result.attempts.len(), 3);
    assert_eq!(result.attempts[0].status, Some(200));
    assert!(!result.attempts[0].succeeded());
    assert!(!result.attempts[1].succeeded());
    assert_eq!(result.accepted_retailer(), Some(Some("store")));
    assert_eq!(result.payload(), Some(&json!({"data": [{"id": 7}]})));
}

#[test]
fn empty_ok_bodies_everywhere_count_as_no_data() {
    let transport = ScriptedTransport::with_replies(vec![
        Ok(HttpReply::new(200, "null")),
        Ok(HttpReply::new(200, "[]")),
        Ok(HttpReply::new(200, "{}")),
        Ok(HttpReply::new(200, "[]")),
    ]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates());

    let report = prober.probe_all(&PROBE_ENDPOINTS[..1], |_| {});

    assert_eq!(report.success_count(), 0);
    assert_eq!(report.results[0].attempts.len(), 4);
}

#[test]
fn bare_request_success_sends_no_retailer_header() {
    let transport =
        ScriptedTransport::with_replies(vec![Ok(HttpReply::new(200, "[1,2,3]"))]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates());

    let result = prober.probe(&PROBE_ENDPOINTS[5]);

    assert_eq!(result.accepted_retailer(), Some(None));
    assert_eq!(transport.retailer_headers(), vec![None]);
}

#[test]
fn probe_all_keeps_table_order_and_page_override() {
    let endpoints = &PROBE_ENDPOINTS[..3];
    let transport = ScriptedTransport::with_replies(vec![
        Ok(HttpReply::new(200, r#"{"data":[]}"#)),
        Ok(HttpReply::new(200, r#"{"data":[{"code":"SP01"}]}"#)),
        Ok(HttpReply::new(200, r#"{"data":[{"name":"An"}]}"#)),
    ]);
    let config = Config::default();
    let session = session();
    let prober = EndpointProber::new(&transport, &config, &session, candidates())
        .with_page_size(Some(2));

    let mut seen = Vec::new();
    let report = prober.probe_all(endpoints, |result| seen.push(result.endpoint.label));

    assert_eq!(seen, vec!["Categories", "Products", "Customers"]);
    let labels: Vec<_> = report.successes().map(|(label, _)| label).collect();
    assert_eq!(labels, vec!["Categories", "Products", "Customers"]);
    assert_eq!(report.success_count(), 3);
    assert!(transport
        .gets
        .borrow()
        .iter()
        .all(|get| get.query[0] == ("pageSize".to_string(), "2".to_string())));
}

/// Exchange real credentials from the environment.
#[test]
#[ignore]
fn live_token_exchange() {
    let credentials = kiot_sdk::config::credentials_from_env().expect("credentials");
    let transport = kiot_sdk::HttpTransport::new(None).expect("client");
    let config = Config::from_env();
    let mut auth = Authenticator::new(&transport, &config, credentials);

    let session = auth.authenticate().expect("authenticate");
    assert!(!session.access_token().is_empty());
}
