//! Storage-layer filter expressions
//!
//! [`WhereClause`] serializes to the nested object shape an ORM query
//! builder accepts directly:
//!
//! ```json
//! {"AND": [{"OR": [{"Type": {"areaId": {"in": ["planning"]}}},
//!                  {"subTypeId": {"in": ["hearing"]}}]}]}
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::field_path::FieldPath;

/// Leaf predicate on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals one of the values
    In(Vec<String>),

    /// Field contains the text
    Contains(String),
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::In(values) => map.serialize_entry("in", values)?,
            Self::Contains(text) => map.serialize_entry("contains", text)?,
        }
        map.end()
    }
}

/// Nested boolean filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereClause {
    /// All children must hold
    And(Vec<WhereClause>),

    /// Any child must hold
    Or(Vec<WhereClause>),

    /// Predicate on a (possibly related) field
    Field {
        /// Field address
        path: FieldPath,
        /// Condition on the field
        predicate: Predicate,
    },
}

impl WhereClause {
    /// `path IN values`
    #[inline]
    #[must_use]
    pub fn field_in(path: FieldPath, values: Vec<String>) -> Self {
        Self::Field {
            path,
            predicate: Predicate::In(values),
        }
    }

    /// `path CONTAINS text`
    #[inline]
    #[must_use]
    pub fn field_contains(path: FieldPath, text: impl Into<String>) -> Self {
        Self::Field {
            path,
            predicate: Predicate::Contains(text.into()),
        }
    }

    /// Child clauses of `AND`/`OR`, empty for a field predicate
    #[must_use]
    pub fn children(&self) -> &[WhereClause] {
        match self {
            Self::And(children) | Self::Or(children) => children,
            Self::Field { .. } => &[],
        }
    }

    /// True for [`WhereClause::And`]
    #[inline]
    #[must_use]
    pub fn is_and(&self) -> bool {
        matches!(self, Self::And(_))
    }

    /// True for [`WhereClause::Or`]
    #[inline]
    #[must_use]
    pub fn is_or(&self) -> bool {
        matches!(self, Self::Or(_))
    }
}

/// Each path segment nests one object around the predicate.
struct Nested<'a> {
    segments: &'a [String],
    predicate: &'a Predicate,
}

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.segments.split_first() {
            None => self.predicate.serialize(serializer),
            Some((head, rest)) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    head,
                    &Nested {
                        segments: rest,
                        predicate: self.predicate,
                    },
                )?;
                map.end()
            }
        }
    }
}

impl Serialize for WhereClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::And(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("AND", children)?;
                map.end()
            }
            Self::Or(children) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("OR", children)?;
                map.end()
            }
            Self::Field { path, predicate } => Nested {
                segments: path.segments(),
                predicate,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn direct_field_in() {
        let clause = WhereClause::field_in(path("typeId"), vec!["t1".into(), "t2".into()]);
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({"typeId": {"in": ["t1", "t2"]}})
        );
    }

    #[test]
    fn relation_nests() {
        let clause = WhereClause::field_in(path("Type.areaId"), vec!["a1".into()]);
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({"Type": {"areaId": {"in": ["a1"]}}})
        );
    }

    #[test]
    fn and_or_wrap_children() {
        let clause = WhereClause::And(vec![WhereClause::Or(vec![
            WhereClause::field_in(path("typeId"), vec!["t1".into()]),
            WhereClause::field_contains(path("reference"), "APP/"),
        ])]);
        assert_eq!(
            serde_json::to_value(&clause).unwrap(),
            json!({"AND": [{"OR": [
                {"typeId": {"in": ["t1"]}},
                {"reference": {"contains": "APP/"}},
            ]}]})
        );
        assert!(clause.is_and());
        assert!(clause.children()[0].is_or());
        assert!(clause.children()[0].children()[0].children().is_empty());
    }
}
