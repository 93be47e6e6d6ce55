//! Filter view models
//!
//! Plain serializable structures handed to the listing template: checkbox
//! groups for the filter panel and removable tags for active selections.

use serde::Serialize;

/// One checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxItem {
    /// Submitted value (taxonomy id)
    pub value: String,

    /// Label
    pub text: String,

    /// Currently selected
    pub checked: bool,
}

/// Set of checkboxes sharing one query key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxGroup {
    /// Element id prefix, unique per group
    pub id_prefix: String,

    /// Form field name (the tier's query key)
    pub name: String,

    /// Fieldset legend
    pub legend: String,

    /// Checkboxes in declaration order
    pub items: Vec<CheckboxItem>,
}

impl CheckboxGroup {
    /// Values of checked items
    pub fn checked_values(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.value.as_str())
    }
}

/// Removable chip for one active selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedTag {
    /// Label
    pub text: String,

    /// Current URL with this selection removed
    pub href: String,
}

/// Active selections sharing a parent group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedCategory {
    /// Heading, e.g. `Planning types`
    pub heading: String,

    /// Tags in selection order
    pub items: Vec<SelectedTag>,
}

/// Everything the filter panel renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView {
    /// Root group first, then one group per parent with children
    pub checkbox_groups: Vec<CheckboxGroup>,

    /// Active selections, grouped
    pub selected_categories: Vec<SelectedCategory>,
}

impl FilterView {
    /// Group by id prefix
    #[must_use]
    pub fn group(&self, id_prefix: &str) -> Option<&CheckboxGroup> {
        self.checkbox_groups
            .iter()
            .find(|group| group.id_prefix == id_prefix)
    }

    /// Check if any selection is active
    #[inline]
    #[must_use]
    pub fn has_selections(&self) -> bool {
        !self.selected_categories.is_empty()
    }

    /// All tags across categories
    pub fn tags(&self) -> impl Iterator<Item = &SelectedTag> {
        self.selected_categories
            .iter()
            .flat_map(|category| category.items.iter())
    }
}
