//! Built-in case classification
//!
//! The reference table ships inside the binary and is parsed on first use.
//! Every later call returns the same instance.

use once_cell::sync::OnceCell;

use crate::error::TaxonomyError;
use crate::taxonomy::Taxonomy;

/// Raw reference table
pub const REFERENCE_YAML: &str = include_str!("../data/reference.yaml");

static REFERENCE: OnceCell<Taxonomy> = OnceCell::new();

/// Process-wide reference taxonomy
///
/// # Errors
/// Returns error if the embedded table fails to parse or validate. A failed
/// attempt is not cached.
pub fn reference() -> Result<&'static Taxonomy, TaxonomyError> {
    REFERENCE.get_or_try_init(|| {
        tracing::debug!("loading reference taxonomy");
        Taxonomy::from_yaml_str(REFERENCE_YAML)
    })
}
