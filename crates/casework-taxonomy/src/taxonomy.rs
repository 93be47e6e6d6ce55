//! Validated three-tier taxonomy
//!
//! Provides [`Taxonomy`], an immutable area → type → subtype table with
//! declaration order preserved, and [`TaxonomyTable`], its serialized shape.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TaxonomyError;
use crate::node::{TaxonomyNode, Tier};

/// Serialized taxonomy: one list per tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTable {
    /// Root tier
    #[serde(default)]
    pub areas: Vec<TaxonomyNode>,

    /// Children of areas
    #[serde(default)]
    pub types: Vec<TaxonomyNode>,

    /// Children of types
    #[serde(default)]
    pub subtypes: Vec<TaxonomyNode>,
}

/// Immutable area/type/subtype classification
///
/// Built once from a [`TaxonomyTable`] and shared by reference. Iteration
/// follows declaration order; nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    tiers: [IndexMap<String, TaxonomyNode>; 3],
}

impl Taxonomy {
    /// Validate and index a table
    ///
    /// # Errors
    /// - [`TaxonomyError::DuplicateId`] for an id repeated within a tier
    /// - [`TaxonomyError::UnexpectedParent`] for an area with a parent
    /// - [`TaxonomyError::MissingParent`] for a type or subtype without one
    /// - [`TaxonomyError::UnknownParent`] when the parent is not declared at
    ///   the tier above
    pub fn new(table: TaxonomyTable) -> Result<Self, TaxonomyError> {
        let TaxonomyTable {
            areas,
            types,
            subtypes,
        } = table;

        let mut taxonomy = Self::default();
        for (tier, nodes) in [
            (Tier::Area, areas),
            (Tier::Type, types),
            (Tier::Subtype, subtypes),
        ] {
            for node in nodes {
                taxonomy.check_parent(tier, &node)?;
                let slot = &mut taxonomy.tiers[tier.index()];
                if slot.contains_key(&node.id) {
                    return Err(TaxonomyError::DuplicateId { tier, id: node.id });
                }
                slot.insert(node.id.clone(), node);
            }
        }

        tracing::debug!(
            areas = taxonomy.len(Tier::Area),
            types = taxonomy.len(Tier::Type),
            subtypes = taxonomy.len(Tier::Subtype),
            "taxonomy loaded"
        );
        Ok(taxonomy)
    }

    fn check_parent(&self, tier: Tier, node: &TaxonomyNode) -> Result<(), TaxonomyError> {
        match (tier.parent(), node.parent_id()) {
            (None, None) => Ok(()),
            (None, Some(parent_id)) => Err(TaxonomyError::UnexpectedParent {
                id: node.id.clone(),
                parent_id: parent_id.to_string(),
            }),
            (Some(_), None) => Err(TaxonomyError::MissingParent {
                tier,
                id: node.id.clone(),
            }),
            (Some(parent_tier), Some(parent_id)) => {
                if self.tiers[parent_tier.index()].contains_key(parent_id) {
                    Ok(())
                } else {
                    Err(TaxonomyError::UnknownParent {
                        tier,
                        id: node.id.clone(),
                        parent_id: parent_id.to_string(),
                    })
                }
            }
        }
    }

    /// Parse and validate YAML
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the table fails validation
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TaxonomyError> {
        let table: TaxonomyTable = serde_yaml::from_str(yaml)?;
        Self::new(table)
    }

    /// Parse and validate JSON
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the table fails validation
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let table: TaxonomyTable = serde_json::from_str(json)?;
        Self::new(table)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has another extension, or
    /// fails to parse or validate
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&read()?),
            Some("json") => Self::from_json_str(&read()?),
            _ => Err(TaxonomyError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Nodes of a tier in declaration order
    pub fn nodes(&self, tier: Tier) -> impl Iterator<Item = &TaxonomyNode> {
        self.tiers[tier.index()].values()
    }

    /// Number of nodes in a tier
    #[inline]
    #[must_use]
    pub fn len(&self, tier: Tier) -> usize {
        self.tiers[tier.index()].len()
    }

    /// Check if every tier is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.iter().all(IndexMap::is_empty)
    }

    /// Look up a node by tier and id
    #[inline]
    #[must_use]
    pub fn get(&self, tier: Tier, id: &str) -> Option<&TaxonomyNode> {
        self.tiers[tier.index()].get(id)
    }

    /// Check if `id` is declared at `tier`
    #[inline]
    #[must_use]
    pub fn contains(&self, tier: Tier, id: &str) -> bool {
        self.tiers[tier.index()].contains_key(id)
    }

    /// Nodes at `child_tier` whose parent is `parent_id`
    pub fn children<'a>(
        &'a self,
        child_tier: Tier,
        parent_id: &'a str,
    ) -> impl Iterator<Item = &'a TaxonomyNode> + 'a {
        self.nodes(child_tier)
            .filter(move |node| node.parent_id() == Some(parent_id))
    }

    /// Check if a node at the tier above `child_tier` has any children
    #[must_use]
    pub fn has_children(&self, child_tier: Tier, parent_id: &str) -> bool {
        self.children(child_tier, parent_id).next().is_some()
    }

    /// Parent of a node, `None` for areas and unknown ids
    #[must_use]
    pub fn parent_of(&self, tier: Tier, id: &str) -> Option<&TaxonomyNode> {
        let parent_tier = tier.parent()?;
        let parent_id = self.get(tier, id)?.parent_id()?;
        self.get(parent_tier, parent_id)
    }

    /// Copy back into the serialized shape
    #[must_use]
    pub fn to_table(&self) -> TaxonomyTable {
        let collect = |tier: Tier| -> Vec<TaxonomyNode> { self.nodes(tier).cloned().collect() };
        TaxonomyTable {
            areas: collect(Tier::Area),
            types: collect(Tier::Type),
            subtypes: collect(Tier::Subtype),
        }
    }
}

impl TryFrom<TaxonomyTable> for Taxonomy {
    type Error = TaxonomyError;

    fn try_from(table: TaxonomyTable) -> Result<Self, Self::Error> {
        Self::new(table)
    }
}

impl Serialize for Taxonomy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_table().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> TaxonomyTable {
        TaxonomyTable {
            areas: vec![TaxonomyNode::root("a1", "Area 1"), TaxonomyNode::root("a2", "Area 2")],
            types: vec![
                TaxonomyNode::child("t1", "Type 1", "a1"),
                TaxonomyNode::child("t2", "Type 2", "a1"),
                TaxonomyNode::child("t3", "Type 3", "a2"),
            ],
            subtypes: vec![TaxonomyNode::child("s1", "Subtype 1", "t2")],
        }
    }

    #[test]
    fn new_preserves_declaration_order() {
        let taxonomy = Taxonomy::new(table()).unwrap();
        let ids: Vec<_> = taxonomy.nodes(Tier::Type).map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(taxonomy.len(Tier::Subtype), 1);
        assert!(!taxonomy.is_empty());
    }

    #[test]
    fn children_and_parents() {
        let taxonomy = Taxonomy::new(table()).unwrap();
        let children: Vec<_> = taxonomy
            .children(Tier::Type, "a1")
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(children, vec!["t1", "t2"]);
        assert!(taxonomy.has_children(Tier::Subtype, "t2"));
        assert!(!taxonomy.has_children(Tier::Subtype, "t1"));
        assert_eq!(taxonomy.parent_of(Tier::Subtype, "s1").unwrap().id, "t2");
        assert!(taxonomy.parent_of(Tier::Area, "a1").is_none());
        assert!(taxonomy.parent_of(Tier::Type, "missing").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut table = table();
        table.types.push(TaxonomyNode::child("t1", "Again", "a2"));
        assert!(matches!(
            Taxonomy::new(table),
            Err(TaxonomyError::DuplicateId { tier: Tier::Type, .. })
        ));
    }

    #[test]
    fn same_id_allowed_across_tiers() {
        let mut table = table();
        table.subtypes.push(TaxonomyNode::child("t1", "Shared id", "t1"));
        assert!(Taxonomy::new(table).is_ok());
    }

    #[test]
    fn rejects_area_with_parent() {
        let mut table = table();
        table.areas.push(TaxonomyNode::child("a3", "Area 3", "a1"));
        assert!(matches!(
            Taxonomy::new(table),
            Err(TaxonomyError::UnexpectedParent { .. })
        ));
    }

    #[test]
    fn rejects_orphans() {
        let mut table = table();
        table.types.push(TaxonomyNode::root("t9", "Orphan"));
        assert!(matches!(
            Taxonomy::new(table),
            Err(TaxonomyError::MissingParent { tier: Tier::Type, .. })
        ));

        let mut table = self::table();
        table.subtypes.push(TaxonomyNode::child("s9", "Lost", "a1"));
        assert!(matches!(
            Taxonomy::new(table),
            Err(TaxonomyError::UnknownParent { tier: Tier::Subtype, .. })
        ));
    }

    #[test]
    fn yaml_and_json_agree() {
        let yaml = "areas:\n  - id: a1\n    displayName: Area 1\ntypes:\n  - id: t1\n    displayName: Type 1\n    parentId: a1\n";
        let json = r#"{"areas":[{"id":"a1","displayName":"Area 1"}],"types":[{"id":"t1","displayName":"Type 1","parentId":"a1"}]}"#;
        assert_eq!(
            Taxonomy::from_yaml_str(yaml).unwrap(),
            Taxonomy::from_json_str(json).unwrap()
        );
    }

    #[test]
    fn to_table_round_trips() {
        let taxonomy = Taxonomy::new(table()).unwrap();
        assert_eq!(taxonomy.to_table(), table());
    }
}
