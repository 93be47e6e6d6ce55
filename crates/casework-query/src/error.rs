//! Error types for the query crate

/// Errors raised while interpreting listing requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Page size of zero
    #[error("page size must be at least 1")]
    ZeroPageSize,
}
