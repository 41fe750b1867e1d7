//! Candidate values for the `Retailer` header.
//!
//! Most tenants reject requests without a `Retailer` header naming the shop,
//! but the token exchange does not tell us that name. The probe tool guesses
//! from a short fixed list; callers who know the shop name should pass it.

use crate::credentials::{prefix_chars, Credentials, PREVIEW_CHARS};

/// Fixed guesses tried after the bare request.
pub const GUESSED_RETAILERS: &[&str] = &["taphoaxyz", "store", "shop"];

/// One value to try for the `Retailer` header. `None` sends no header.
pub type RetailerCandidate = Option<String>;

/// Ordered, deduplicated candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailerCandidates(Vec<RetailerCandidate>);

impl RetailerCandidates {
    /// Bare request first, then the fixed guesses, then a client id prefix.
    pub fn guessed(credentials: &Credentials) -> Self {
        let client_prefix = prefix_chars(credentials.client_id(), PREVIEW_CHARS);
        let mut names: Vec<&str> = GUESSED_RETAILERS.to_vec();
        names.push(client_prefix);
        Self::with_bare_request(names)
    }

    /// Bare request first, then each supplied name.
    pub fn with_bare_request<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut candidates = Self(vec![None]);
        for name in names {
            candidates.push(name);
        }
        candidates
    }

    /// Only the supplied names; no bare request.
    pub fn named<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut candidates = Self(Vec::new());
        for name in names {
            candidates.push(name);
        }
        candidates
    }

    fn push(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let candidate = Some(name.to_string());
        if !self.0.contains(&candidate) {
            self.0.push(candidate);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.0.iter().map(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
