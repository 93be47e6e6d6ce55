//! Error types for taxonomy loading and validation

use std::path::PathBuf;

use crate::node::Tier;

/// Taxonomy errors
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    /// Same id declared twice within a tier
    #[error("duplicate {tier} id '{id}'")]
    DuplicateId {
        /// Tier of the duplicate
        tier: Tier,
        /// Repeated id
        id: String,
    },

    /// Root-tier node declares a parent
    #[error("area '{id}' must not have a parent (found '{parent_id}')")]
    UnexpectedParent {
        /// Offending node
        id: String,
        /// Declared parent
        parent_id: String,
    },

    /// Non-root node without a parent
    #[error("{tier} '{id}' has no parent")]
    MissingParent {
        /// Tier of the node
        tier: Tier,
        /// Offending node
        id: String,
    },

    /// Parent id not found at the tier above
    #[error("{tier} '{id}' references unknown parent '{parent_id}'")]
    UnknownParent {
        /// Tier of the node
        tier: Tier,
        /// Offending node
        id: String,
        /// Missing parent
        parent_id: String,
    },

    /// Unrecognised tier name
    #[error("unknown tier '{0}' (expected area, type or subtype)")]
    UnknownTier(String),

    /// YAML syntax or shape error
    #[error("invalid taxonomy YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// JSON syntax or shape error
    #[error("invalid taxonomy JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// File could not be read
    #[error("failed to read taxonomy file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File extension other than yaml/yml/json
    #[error("unsupported taxonomy file format: {0}")]
    UnsupportedFormat(PathBuf),
}
