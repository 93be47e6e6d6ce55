//! Filter configuration
//!
//! Names the query keys, label suffixes and storage fields used for each
//! taxonomy tier. Every field has a default, so an empty file is valid.

use std::path::Path;

use casework_query::PAGE_KEY;
use casework_taxonomy::Tier;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::field_path::FieldPath;

/// One value per taxonomy tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerTier<T> {
    /// Area tier
    pub area: T,

    /// Type tier
    #[serde(rename = "type")]
    pub type_: T,

    /// Subtype tier
    pub subtype: T,
}

impl<T> PerTier<T> {
    /// Create from the three values
    #[inline]
    pub const fn new(area: T, type_: T, subtype: T) -> Self {
        Self {
            area,
            type_,
            subtype,
        }
    }

    /// Value for a tier
    #[inline]
    #[must_use]
    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::Area => &self.area,
            Tier::Type => &self.type_,
            Tier::Subtype => &self.subtype,
        }
    }

    /// Apply `f` to each value
    pub fn map<U>(&self, mut f: impl FnMut(Tier, &T) -> U) -> PerTier<U> {
        PerTier {
            area: f(Tier::Area, &self.area),
            type_: f(Tier::Type, &self.type_),
            subtype: f(Tier::Subtype, &self.subtype),
        }
    }

    /// `(tier, value)` pairs root first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

/// Query-parameter names per tier
pub type TierKeys = PerTier<String>;

/// Display-label suffixes per tier
pub type TierLabels = PerTier<String>;

/// Storage field paths per tier
pub type TierFields = PerTier<FieldPath>;

/// Filter generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Query-parameter name of each tier
    pub keys: TierKeys,

    /// Label suffix of each tier
    pub labels: TierLabels,

    /// Storage field each tier filters on
    pub fields: TierFields,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keys: PerTier::new("area".into(), "type".into(), "subtype".into()),
            labels: PerTier::new("Case areas".into(), "types".into(), "subtypes".into()),
            fields: PerTier::new(
                FieldPath::through("Type", "areaId"),
                FieldPath::single("typeId"),
                FieldPath::single("subTypeId"),
            ),
        }
    }
}

impl FilterConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With query keys
    #[inline]
    #[must_use]
    pub fn with_keys(mut self, keys: TierKeys) -> Self {
        self.keys = keys;
        self
    }

    /// With label suffixes
    #[inline]
    #[must_use]
    pub fn with_labels(mut self, labels: TierLabels) -> Self {
        self.labels = labels;
        self
    }

    /// With storage fields
    #[inline]
    #[must_use]
    pub fn with_fields(mut self, fields: TierFields) -> Self {
        self.fields = fields;
        self
    }

    /// Check keys are non-empty, distinct, and not the page key
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidConfig`] naming the offending key
    pub fn validate(&self) -> Result<(), FilterError> {
        for (tier, key) in self.keys.iter() {
            if key.trim().is_empty() {
                return Err(FilterError::InvalidConfig(format!("{tier} key is empty")));
            }
            if key == PAGE_KEY {
                return Err(FilterError::InvalidConfig(format!(
                    "{tier} key '{key}' collides with the page parameter"
                )));
            }
        }
        let keys = [&self.keys.area, &self.keys.type_, &self.keys.subtype];
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(FilterError::InvalidConfig(format!(
                    "key '{key}' is used for more than one tier"
                )));
            }
        }
        Ok(())
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// Returns error if TOML is invalid or the configuration fails validation
    pub fn from_toml_str(toml: &str) -> Result<Self, FilterError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the configuration fails validation
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FilterError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has another extension, or
    /// fails to parse or validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FilterError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let read = || {
            std::fs::read_to_string(path).map_err(|source| FilterError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&read()?),
            Some("yaml" | "yml") => Self::from_yaml_str(&read()?),
            _ => Err(FilterError::UnsupportedFormat(path.to_path_buf())),
        };
        if let Err(err) = &config {
            tracing::warn!(path = %path.display(), "rejected filter config: {err}");
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.keys.get(Tier::Area), "area");
        assert_eq!(config.keys.get(Tier::Subtype), "subtype");
        assert_eq!(config.labels.get(Tier::Type), "types");
        assert_eq!(config.fields.get(Tier::Area).to_string(), "Type.areaId");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(FilterConfig::from_toml_str("").unwrap(), FilterConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = FilterConfig::from_toml_str(
            r#"
            [keys]
            area = "caseArea"
            type = "caseType"
            subtype = "caseSubType"

            [fields]
            area = "CaseType.caseAreaId"
            type = "caseTypeId"
            subtype = "caseSubTypeId"
            "#,
        )
        .unwrap();
        assert_eq!(config.keys.type_, "caseType");
        assert_eq!(config.fields.area.relations(), &["CaseType"]);
        // labels untouched
        assert_eq!(config.labels, FilterConfig::default().labels);
    }

    #[test]
    fn yaml_overrides() {
        let config = FilterConfig::from_yaml_str("labels:\n  area: Areas\n  type: Types\n  subtype: Sub-types\n").unwrap();
        assert_eq!(config.labels.subtype, "Sub-types");
    }

    #[test]
    fn rejects_duplicate_keys() {
        let config = FilterConfig::new().with_keys(PerTier::new(
            "area".into(),
            "kind".into(),
            "kind".into(),
        ));
        assert!(matches!(config.validate(), Err(FilterError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_page_key() {
        let config = FilterConfig::new().with_keys(PerTier::new(
            "page".into(),
            "type".into(),
            "subtype".into(),
        ));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn rejects_blank_key() {
        let config = FilterConfig::new().with_keys(PerTier::new(
            "area".into(),
            " ".into(),
            "subtype".into(),
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_field_path_in_toml() {
        let result = FilterConfig::from_toml_str("[fields]\narea = \"Type.\"\ntype = \"t\"\nsubtype = \"s\"\n");
        assert!(matches!(result, Err(FilterError::InvalidToml(_))));
    }

    #[test]
    fn per_tier_map_and_iter() {
        let lens = FilterConfig::default().keys.map(|_, key| key.len());
        assert_eq!(lens, PerTier::new(4, 4, 7));
        let tiers: Vec<Tier> = FilterConfig::default().keys.iter().map(|(t, _)| t).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }
}
