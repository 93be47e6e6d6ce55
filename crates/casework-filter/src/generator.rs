//! Taxonomy filter generation
//!
//! Provides [`FilterGenerator`], which reads the area/type/subtype selections
//! from a request query and produces both the storage where-clause and the
//! filter panel view model.

use casework_query::{QueryParams, UrlBuilder};
use casework_taxonomy::{Taxonomy, TaxonomyNode, Tier};

use crate::config::{FilterConfig, PerTier};
use crate::error::FilterError;
use crate::view::{CheckboxGroup, CheckboxItem, FilterView, SelectedCategory, SelectedTag};
use crate::where_clause::WhereClause;

/// Parent tier → child tier pairs that get one checkbox group per parent
const NESTED_TIERS: [(Tier, Tier); 2] = [(Tier::Area, Tier::Type), (Tier::Type, Tier::Subtype)];

/// Filter generator over a fixed taxonomy
///
/// Stateless apart from its borrowed taxonomy and configuration, so one
/// instance can serve concurrent requests.
///
/// # Example
/// ```
/// use casework_filter::FilterGenerator;
/// use casework_query::QueryParams;
/// use casework_taxonomy::reference;
///
/// let generator = FilterGenerator::with_defaults(reference().unwrap());
/// let query = QueryParams::parse("area=planning&subtype=hearing");
///
/// let clause = generator.create_filter_where_clause(&query).unwrap();
/// assert_eq!(clause.children()[0].children().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FilterGenerator<'t> {
    taxonomy: &'t Taxonomy,
    config: FilterConfig,
}

impl<'t> FilterGenerator<'t> {
    /// Create generator
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidConfig`] if the configuration fails
    /// validation
    pub fn new(taxonomy: &'t Taxonomy, config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { taxonomy, config })
    }

    /// Create generator with the default configuration
    #[inline]
    #[must_use]
    pub fn with_defaults(taxonomy: &'t Taxonomy) -> Self {
        Self {
            taxonomy,
            config: FilterConfig::default(),
        }
    }

    /// Taxonomy being filtered over
    #[inline]
    #[must_use]
    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Selected ids per tier
    ///
    /// A bare string counts as one selection; absent and malformed values
    /// count as none.
    #[must_use]
    pub fn selections<'q>(&self, query: &'q QueryParams) -> PerTier<&'q [String]> {
        self.config.keys.map(|_, key| query.values(key))
    }

    /// Storage where-clause for the selected taxonomy nodes
    ///
    /// Returns `None` when nothing is selected. Otherwise the clause is an
    /// `AND` holding a single `OR` with one `IN` leaf per tier that has a
    /// selection, in area, type, subtype order. Tiers broaden each other:
    /// a record matching any tier's leaf matches the clause.
    #[must_use]
    pub fn create_filter_where_clause(&self, query: &QueryParams) -> Option<WhereClause> {
        let leaves: Vec<WhereClause> = self
            .selections(query)
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(tier, values)| {
                WhereClause::field_in(self.config.fields.get(tier).clone(), values.to_vec())
            })
            .collect();

        if leaves.is_empty() {
            return None;
        }

        tracing::debug!(tiers = leaves.len(), "built taxonomy filter clause");
        Some(WhereClause::And(vec![WhereClause::Or(leaves)]))
    }

    /// Filter panel view model
    ///
    /// `base_url` is the listing URL the removal links point at; the current
    /// query is re-appended to it minus the removed value.
    #[must_use]
    pub fn generate_filters(&self, query: &QueryParams, base_url: &str) -> FilterView {
        let selected = self.selections(query);
        FilterView {
            checkbox_groups: self.checkbox_groups(&selected),
            selected_categories: self.selected_categories(&selected, query, base_url),
        }
    }

    fn checkbox_groups(&self, selected: &PerTier<&[String]>) -> Vec<CheckboxGroup> {
        let root_key = &self.config.keys.area;
        let mut groups = vec![CheckboxGroup {
            id_prefix: root_key.clone(),
            name: root_key.clone(),
            legend: self.config.labels.area.clone(),
            items: checkbox_items(self.taxonomy.nodes(Tier::Area), selected.area),
        }];

        for (parent_tier, child_tier) in NESTED_TIERS {
            let key = self.config.keys.get(child_tier);
            let label = self.config.labels.get(child_tier);
            for parent in self.taxonomy.nodes(parent_tier) {
                let items = checkbox_items(
                    self.taxonomy.children(child_tier, &parent.id),
                    selected.get(child_tier),
                );
                if items.is_empty() {
                    continue;
                }
                groups.push(CheckboxGroup {
                    id_prefix: format!("{key}-{}", parent.id),
                    name: key.clone(),
                    legend: format!("{} {label}", parent.display_name),
                    items,
                });
            }
        }
        groups
    }

    fn selected_categories(
        &self,
        selected: &PerTier<&[String]>,
        query: &QueryParams,
        base_url: &str,
    ) -> Vec<SelectedCategory> {
        let mut categories = Vec::new();

        for (tier, values) in selected.iter() {
            if values.is_empty() {
                continue;
            }
            let key = self.config.keys.get(tier);
            let label = self.config.labels.get(tier);

            let mut distinct: Vec<&str> = Vec::with_capacity(values.len());
            for value in values.iter() {
                if !distinct.contains(&value.as_str()) {
                    distinct.push(value);
                }
            }
            let nodes: Vec<&TaxonomyNode> = distinct
                .iter()
                .filter_map(|id| self.taxonomy.get(tier, id))
                .collect();
            if nodes.len() < distinct.len() {
                tracing::debug!(
                    %tier,
                    unknown = distinct.len() - nodes.len(),
                    "ignoring selections missing from taxonomy"
                );
            }

            let tag = |node: &TaxonomyNode| SelectedTag {
                text: node.display_name.clone(),
                href: UrlBuilder::new(base_url)
                    .add_query_params(&query.with_value_removed(key, &node.id))
                    .to_string(),
            };

            match tier.parent() {
                None => {
                    if !nodes.is_empty() {
                        categories.push(SelectedCategory {
                            heading: label.clone(),
                            items: nodes.iter().copied().map(&tag).collect(),
                        });
                    }
                }
                Some(parent_tier) => {
                    for parent in self.taxonomy.nodes(parent_tier) {
                        let items: Vec<SelectedTag> = nodes
                            .iter()
                            .copied()
                            .filter(|node| node.parent_id() == Some(parent.id.as_str()))
                            .map(&tag)
                            .collect();
                        if items.is_empty() {
                            continue;
                        }
                        categories.push(SelectedCategory {
                            heading: format!("{} {label}", parent.display_name),
                            items,
                        });
                    }
                }
            }
        }
        categories
    }
}

fn checkbox_items<'a>(
    nodes: impl Iterator<Item = &'a TaxonomyNode>,
    selected: &[String],
) -> Vec<CheckboxItem> {
    nodes
        .map(|node| CheckboxItem {
            value: node.id.clone(),
            text: node.display_name.clone(),
            checked: selected.contains(&node.id),
        })
        .collect()
}
