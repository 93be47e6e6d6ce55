//! Fluent URL construction
//!
//! Provides [`UrlBuilder`] for composing a base URL with path segments and
//! repeated query parameters.

use std::fmt::{self, Display, Formatter};

use url::form_urlencoded;

use crate::query::QueryParams;

/// Builder for `base/seg/seg?k=v&k=v` URLs
///
/// Query parameters keep insertion order and duplicate keys are kept as
/// repeated parameters.
///
/// # Example
/// ```
/// use casework_query::UrlBuilder;
///
/// let url = UrlBuilder::new("http://example.com/")
///     .add_path_segment("a")
///     .add_query_param("k", "v");
/// assert_eq!(url.to_string(), "http://example.com/a?k=v");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBuilder {
    base: String,
    segments: Vec<String>,
    params: Vec<(String, String)>,
}

impl UrlBuilder {
    /// Create builder, stripping trailing slashes from `base`
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        let trimmed = base.trim_end_matches('/').len();
        base.truncate(trimmed);
        Self {
            base,
            segments: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append a path segment
    #[inline]
    #[must_use]
    pub fn add_path_segment(mut self, segment: impl Into<String>) -> Self {
        self.push_path_segment(segment);
        self
    }

    /// Append a query parameter
    #[inline]
    #[must_use]
    pub fn add_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_query_param(key, value);
        self
    }

    /// Append every pair of `params`, lists repeated in order
    #[inline]
    #[must_use]
    pub fn add_query_params(mut self, params: &QueryParams) -> Self {
        self.push_query_params(params);
        self
    }

    /// Append a path segment in place
    pub fn push_path_segment(&mut self, segment: impl Into<String>) -> &mut Self {
        self.segments.push(segment.into());
        self
    }

    /// Append a query parameter in place
    pub fn push_query_param(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append every pair of `params` in place
    pub fn push_query_params(&mut self, params: &QueryParams) -> &mut Self {
        self.params.extend(
            params
                .pairs()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        self
    }

    /// Base URL without trailing slashes
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Path segments added so far
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Query parameters added so far
    #[inline]
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl Display for UrlBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for segment in &self.segments {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        if !self.params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.params)
                .finish();
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
