//! Error types for filter configuration

use std::path::PathBuf;

/// Filter configuration errors
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Field path with an empty segment
    #[error("field path '{0}' contains an empty segment")]
    EmptyFieldSegment(String),

    /// Configuration rejected
    #[error("invalid filter configuration: {0}")]
    InvalidConfig(String),

    /// TOML syntax or shape error
    #[error("invalid filter TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// YAML syntax or shape error
    #[error("invalid filter YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// File could not be read
    #[error("failed to read filter config {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File extension other than toml/yaml/yml
    #[error("unsupported filter config format: {0}")]
    UnsupportedFormat(PathBuf),
}
