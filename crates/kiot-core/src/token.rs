//! Read-only inspection of the bearer token's JWT payload.
//!
//! The signature is never checked: the token is ours and the claims are only
//! printed to help find the shop name the `Retailer` header wants.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

/// Claims shown when present, in this order.
pub const INTERESTING_CLAIMS: &[&str] = &[
    "sub",
    "aud",
    "iss",
    "client_id",
    "scope",
    "retailer",
    "shop_name",
    "name",
];

/// Lowercase substrings that mark a claim key as a possible tenant name.
pub const TENANT_HINTS: &[&str] = &["retail", "shop", "store", "merchant"];

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("token has {0} segments, expected 3")]
    SegmentCount(usize),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// What the token payload reveals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenInsight {
    /// Signing algorithm from the JOSE header, when it parses.
    pub algorithm: Option<String>,
    /// Allow-listed claims as `(name, rendered value)`.
    pub claims: Vec<(String, String)>,
    /// Claims whose key hints at a retailer/shop/store/merchant.
    pub tenant_hints: Vec<(String, String)>,
}

impl TokenInsight {
    /// First tenant hint value, if any.
    pub fn retailer_hint(&self) -> Option<&str> {
        self.tenant_hints.first().map(|(_, value)| value.as_str())
    }
}

/// Decode the middle segment of `token` and collect claims of interest.
pub fn inspect_token(token: &str) -> Result<TokenInsight, InspectError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(InspectError::SegmentCount(segments.len()));
    }

    let bytes = decode_segment(segments[1])?;
    let text = String::from_utf8(bytes)?;
    let payload = match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => map,
        _ => return Err(InspectError::NotAnObject),
    };

    let algorithm = jsonwebtoken::decode_header(token)
        .ok()
        .map(|header| format!("{:?}", header.alg));

    Ok(TokenInsight {
        algorithm,
        claims: allow_listed(&payload),
        tenant_hints: tenant_hints(&payload),
    })
}

/// Pad to a multiple of four with `=` and decode. JWTs use the URL-safe
/// alphabet, so that is tried when the standard alphabet rejects the input.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut padded = segment.trim_end_matches('=').to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    STANDARD
        .decode(&padded)
        .or_else(|_| URL_SAFE.decode(&padded))
}

fn allow_listed(payload: &Map<String, Value>) -> Vec<(String, String)> {
    INTERESTING_CLAIMS
        .iter()
        .filter_map(|claim| {
            payload
                .get(*claim)
                .map(|value| (claim.to_string(), render_claim(value)))
        })
        .collect()
}

fn tenant_hints(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            TENANT_HINTS.iter().any(|hint| key.contains(hint))
        })
        .map(|(key, value)| (key.clone(), render_claim(value)))
        .collect()
}

/// Strings print bare; everything else as compact JSON.
pub fn render_claim(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
