//! Storage field paths
//!
//! Provides [`FieldPath`] for addressing a record field, directly
//! (`typeId`) or through relations (`Type.areaId`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Dotted path to a storage field
///
/// Leading segments name relations, the last names the field.
///
/// # Examples
/// - `typeId` → `{"typeId": {...}}`
/// - `Type.areaId` → `{"Type": {"areaId": {...}}}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Path of a single field
    #[inline]
    #[must_use]
    pub fn single(field: impl Into<String>) -> Self {
        Self(vec![field.into()])
    }

    /// Path of `field` on the related record `relation`
    #[inline]
    #[must_use]
    pub fn through(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self(vec![relation.into(), field.into()])
    }

    /// Create from segments
    ///
    /// # Errors
    /// Returns [`FilterError::EmptyFieldSegment`] if there are no segments or
    /// any segment is empty
    pub fn new(segments: Vec<String>) -> Result<Self, FilterError> {
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(FilterError::EmptyFieldSegment(segments.join(".")));
        }
        Ok(Self(segments))
    }

    /// Path segments, never empty
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Field name (last segment)
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// Relation segments before the field
    #[inline]
    #[must_use]
    pub fn relations(&self) -> &[String] {
        &self.0[..self.0.len().saturating_sub(1)]
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split('.').map(|seg| seg.trim().to_string()).collect())
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}
