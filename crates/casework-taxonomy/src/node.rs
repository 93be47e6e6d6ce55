//! Taxonomy nodes and tiers

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;

/// Level of the case classification
///
/// Tiers are ordered root first: an area contains types, a type contains
/// subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Root tier
    Area,

    /// Middle tier, parent is an area
    Type,

    /// Leaf tier, parent is a type
    Subtype,
}

impl Tier {
    /// All tiers, root first
    pub const ALL: [Tier; 3] = [Tier::Area, Tier::Type, Tier::Subtype];

    /// Position in [`Tier::ALL`]
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Area => 0,
            Self::Type => 1,
            Self::Subtype => 2,
        }
    }

    /// Tier above, `None` for the root
    #[inline]
    #[must_use]
    pub const fn parent(self) -> Option<Tier> {
        match self {
            Self::Area => None,
            Self::Type => Some(Self::Area),
            Self::Subtype => Some(Self::Type),
        }
    }

    /// Tier below, `None` for the leaf
    #[inline]
    #[must_use]
    pub const fn child(self) -> Option<Tier> {
        match self {
            Self::Area => Some(Self::Type),
            Self::Type => Some(Self::Subtype),
            Self::Subtype => None,
        }
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Type => "type",
            Self::Subtype => "subtype",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "area" => Ok(Self::Area),
            "type" => Ok(Self::Type),
            "subtype" => Ok(Self::Subtype),
            other => Err(TaxonomyError::UnknownTier(other.to_string())),
        }
    }
}

/// One classification record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyNode {
    /// Stable identifier
    pub id: String,

    /// Human label
    pub display_name: String,

    /// Containing node at the tier above
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl TaxonomyNode {
    /// Create a root-tier node
    #[inline]
    #[must_use]
    pub fn root(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            parent_id: None,
        }
    }

    /// Create a node under `parent_id`
    #[inline]
    #[must_use]
    pub fn child(
        id: impl Into<String>,
        display_name: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            parent_id: Some(parent_id.into()),
        }
    }

    /// Parent id as `&str`
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_navigation() {
        assert_eq!(Tier::Area.parent(), None);
        assert_eq!(Tier::Type.parent(), Some(Tier::Area));
        assert_eq!(Tier::Subtype.parent(), Some(Tier::Type));
        assert_eq!(Tier::Area.child(), Some(Tier::Type));
        assert_eq!(Tier::Subtype.child(), None);
    }

    #[test]
    fn tier_index_matches_all() {
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.index(), i);
        }
    }

    #[test]
    fn tier_round_trips_through_str() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert!(matches!(
            "district".parse::<Tier>(),
            Err(TaxonomyError::UnknownTier(_))
        ));
    }

    #[test]
    fn node_uses_camel_case_fields() {
        let node: TaxonomyNode =
            serde_json::from_str(r#"{"id":"t1","displayName":"Type 1","parentId":"a1"}"#).unwrap();
        assert_eq!(node, TaxonomyNode::child("t1", "Type 1", "a1"));
        assert_eq!(node.parent_id(), Some("a1"));
    }

    #[test]
    fn root_node_omits_parent() {
        let json = serde_json::to_string(&TaxonomyNode::root("a1", "Area 1")).unwrap();
        assert_eq!(json, r#"{"id":"a1","displayName":"Area 1"}"#);
    }
}
