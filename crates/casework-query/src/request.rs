//! Request context
//!
//! The parts of an inbound HTTP request the listing generators read.

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;

/// Base URL, path and query of an inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Mount point of the router handling the request (may be empty)
    pub base_url: String,

    /// Path below the mount point
    pub path: String,

    /// Parsed query parameters
    pub query: QueryParams,
}

impl RequestContext {
    /// Create request context
    #[inline]
    #[must_use]
    pub fn new(base_url: impl Into<String>, path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            query,
        }
    }

    /// Split a `path?query` string
    ///
    /// The whole path goes to [`RequestContext::path`]; the base URL is empty.
    /// Any `#fragment` is dropped.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.split_once('?') {
            Some((path, query)) => Self::new("", path, QueryParams::parse(query)),
            None => Self::new("", url, QueryParams::new()),
        }
    }

    /// `base_url` followed by `path`
    #[inline]
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}
