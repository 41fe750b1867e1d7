//! Client credentials for the token exchange.

use std::fmt;

/// Number of client id characters shown in masked output.
pub const PREVIEW_CHARS: usize = 10;

/// OAuth client id and secret, cleaned of stray quoting.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: clean_value(client_id),
            client_secret: clean_value(client_secret),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// First characters of the client id followed by `...`.
    pub fn masked_client_id(&self) -> String {
        format!("{}...", prefix_chars(&self.client_id, PREVIEW_CHARS))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.masked_client_id())
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Strip surrounding whitespace, then double quotes, then single quotes.
///
/// Values pasted from `.env` files often keep their quoting when exported
/// by hand, e.g. `CLIENT_ID="abc"`.
pub fn clean_value(raw: &str) -> String {
    raw.trim().trim_matches('"').trim_matches('\'').to_string()
}

/// Up to `count` leading characters of `value`.
pub fn prefix_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
