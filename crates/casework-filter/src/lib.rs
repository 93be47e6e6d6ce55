//! Casework Filter
//!
//! Taxonomy filtering for casework listings.
//!
//! # Core Concepts
//!
//! - [`FilterGenerator`]: request query → where-clause and filter panel
//! - [`WhereClause`]: nested `AND`/`OR` expression for the storage layer
//! - [`FilterView`]: checkbox groups and removable selection tags
//! - [`FilterConfig`]: query keys, labels and storage fields per tier
//! - [`create_search_where_clause`]: free-text terms over searchable fields
//!
//! # Example
//!
//! ```rust
//! use casework_filter::{combine_where_clauses, create_search_where_clause, FieldPath, FilterGenerator};
//! use casework_query::QueryParams;
//! use casework_taxonomy::reference;
//!
//! let generator = FilterGenerator::with_defaults(reference().unwrap());
//! let query = QueryParams::parse("type=planning-appeals&q=mill");
//!
//! let filter = generator.create_filter_where_clause(&query);
//! let search = create_search_where_clause(query.first("q").unwrap_or(""), &[FieldPath::single("reference")]);
//! let clause = combine_where_clauses([filter, search]).unwrap();
//! assert!(clause.is_and());
//!
//! let view = generator.generate_filters(&query, "/cases");
//! assert_eq!(view.selected_categories[0].heading, "Planning types");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod field_path;
pub mod generator;
pub mod search;
pub mod view;
pub mod where_clause;

// Re-exports
pub use config::{FilterConfig, PerTier, TierFields, TierKeys, TierLabels};
pub use error::FilterError;
pub use field_path::FieldPath;
pub use generator::FilterGenerator;
pub use search::{combine_where_clauses, create_search_where_clause};
pub use view::{CheckboxGroup, CheckboxItem, FilterView, SelectedCategory, SelectedTag};
pub use where_clause::{Predicate, WhereClause};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for filter generation
    pub use crate::{
        combine_where_clauses, create_search_where_clause, FieldPath, FilterConfig,
        FilterGenerator, FilterView, WhereClause,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
