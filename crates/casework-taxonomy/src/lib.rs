//! Casework Taxonomy
//!
//! Three-tier case classification: an **area** contains **types**, a type
//! contains **subtypes**.
//!
//! # Overview
//!
//! - **TaxonomyNode**: id, display name and parent link
//! - **Taxonomy**: validated, immutable table in declaration order
//! - **reference()**: built-in table, loaded once per process
//!
//! # Example
//!
//! ```rust
//! use casework_taxonomy::{reference, Tier};
//!
//! let taxonomy = reference().unwrap();
//! let types: Vec<_> = taxonomy
//!     .children(Tier::Type, "rights-of-way")
//!     .map(|node| node.display_name.as_str())
//!     .collect();
//! assert_eq!(types[0], "Definitive map orders");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod node;
pub mod reference;
pub mod taxonomy;

// Re-exports
pub use error::TaxonomyError;
pub use node::{TaxonomyNode, Tier};
pub use reference::{reference, REFERENCE_YAML};
pub use taxonomy::{Taxonomy, TaxonomyTable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
