//! Request query parameters
//!
//! Provides [`QueryParams`], an insertion-ordered mapping of query keys to
//! [`QueryValue`]s, in the shape a web framework hands to a request handler.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::form_urlencoded;

/// Value of a single query key
///
/// A key that occurs once is a bare string, a repeated key is a list.
/// Anything else (numbers, objects, lists holding non-strings) is kept as
/// [`QueryValue::Malformed`] and reads as "no values".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Key present once
    One(String),

    /// Key present several times, in request order
    Many(Vec<String>),

    /// Value of an unsupported shape
    Malformed(JsonValue),
}

impl QueryValue {
    /// Classify a JSON value
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) => Self::One(s.clone()),
            JsonValue::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                match strings {
                    Some(values) => Self::Many(values),
                    None => Self::Malformed(value.clone()),
                }
            }
            other => Self::Malformed(other.clone()),
        }
    }

    /// Values as a slice
    ///
    /// A bare string is a one-element slice; malformed values are empty.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
            Self::Malformed(_) => &[],
        }
    }

    /// True for [`QueryValue::Malformed`]
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Insertion-ordered query parameter mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(IndexMap<String, QueryValue>);

impl QueryParams {
    /// Create empty parameters
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Parse a form-urlencoded query string
    ///
    /// A leading `?` is ignored. Repeated keys collect into a list in
    /// request order.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
        params
    }

    /// Build from a JSON object
    ///
    /// Non-object input yields empty parameters.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(object) = value.as_object() else {
            return Self::new();
        };
        Self(
            object
                .iter()
                .map(|(key, value)| (key.clone(), QueryValue::from_json(value)))
                .collect(),
        )
    }

    /// Append a value, turning a bare string into a list on repeat
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.0.entry(key.into()) {
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(QueryValue::One(value));
            }
            indexmap::map::Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                *slot = match std::mem::replace(slot, QueryValue::Many(Vec::new())) {
                    QueryValue::One(first) => QueryValue::Many(vec![first, value]),
                    QueryValue::Many(mut values) => {
                        values.push(value);
                        QueryValue::Many(values)
                    }
                    QueryValue::Malformed(_) => QueryValue::One(value),
                };
            }
        }
    }

    /// Insert or replace a key, keeping its position when it already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove a key, preserving the order of the rest
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.0.shift_remove(key)
    }

    /// Raw value for a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Values for a key (empty when absent or malformed)
    #[inline]
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        match self.0.get(key) {
            Some(value) => value.values(),
            None => &[],
        }
    }

    /// First value for a key
    #[inline]
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// Check if a key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no keys
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys and raw values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into `(key, value)` pairs, repeating list keys
    ///
    /// Malformed values produce no pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, v)| v.values().iter().map(move |value| (k.as_str(), value.as_str())))
    }

    /// Copy without the given key
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.remove(key);
        copy
    }

    /// Copy with every occurrence of `value` removed from `key`
    ///
    /// The key disappears when no values remain. Other keys and the
    /// remaining values of `key` keep their order.
    #[must_use]
    pub fn with_value_removed(&self, key: &str, value: &str) -> Self {
        let mut copy = self.clone();
        let emptied = match copy.0.get_mut(key) {
            Some(QueryValue::One(existing)) => existing == value,
            Some(QueryValue::Many(values)) => {
                values.retain(|v| v != value);
                values.is_empty()
            }
            Some(QueryValue::Malformed(_)) | None => false,
        };
        if emptied {
            copy.remove(key);
        }
        copy
    }

    /// Serialize to a form-urlencoded query string (no leading `?`)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl FromIterator<(String, QueryValue)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, QueryValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = indexmap::map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
