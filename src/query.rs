//! Initial selection from a page URL or query string.
//!
//! Resolution never fails: anything missing or unrecognized falls back to
//! the default selection.

use crate::selection::Selection;
use crate::taxonomy::{ALL_LANGUAGES, SortMode, Topic};
use url::Url;

/// Decoded `key=value` pairs in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse either a full URL (`https://host/path?sort=x`) or a bare query
    /// string (`sort=x&topic=y`, leading `?` optional). A URL that fails to
    /// parse yields no parameters.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.contains("://") {
            return match Url::parse(input) {
                Ok(url) => Self {
                    pairs: url.query_pairs().into_owned().collect(),
                },
                Err(e) => {
                    tracing::warn!(input, error = %e, "ignoring malformed url");
                    Self::default()
                }
            };
        }
        let query = input.strip_prefix('?').unwrap_or(input);
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace every value for `key` with a single one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.into()));
    }
}

/// Build a selection from raw query parameters.
pub fn resolve(params: &QueryParams) -> Selection {
    let sort = params
        .get("sort")
        .and_then(SortMode::from_name)
        .unwrap_or_default();
    let topic = params
        .get("topic")
        .and_then(Topic::from_name)
        .unwrap_or_default();
    let language = match params.get("language") {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => ALL_LANGUAGES.to_string(),
    };
    let scroll = params.get("scroll").is_some_and(|s| !s.is_empty());

    Selection {
        topic,
        language,
        sort,
        scroll,
    }
}
