//! Casework Query
//!
//! Request-side building blocks for casework listings.
//!
//! # Overview
//!
//! - **QueryParams**: insertion-ordered query mapping (bare string or list per key)
//! - **RequestContext**: base URL, path and query of a request
//! - **UrlBuilder**: fluent `base/segment?key=value` construction
//! - **PaginationModel**: abbreviated page window with query-preserving links
//! - **PageRequest**: page number and size mapped to skip/take
//!
//! # Example
//!
//! ```rust
//! use casework_query::{get_pagination_model, RequestContext};
//!
//! let request = RequestContext::from_url("/cases?area=planning&page=5");
//! let model = get_pagination_model(&request, 10, 5);
//!
//! assert_eq!(model.page_numbers(), vec![1, 4, 5, 6, 10]);
//! assert_eq!(model.next.unwrap().href, "/cases?area=planning&page=6");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod pagination;
pub mod query;
pub mod request;
pub mod url_builder;

// Re-exports
pub use error::QueryError;
pub use pagination::{
    get_pagination_model, PageLink, PageRequest, PaginationItem, PaginationModel, PAGE_KEY,
};
pub use query::{QueryParams, QueryValue};
pub use request::RequestContext;
pub use url_builder::UrlBuilder;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for listing requests
    pub use crate::{
        get_pagination_model, PageRequest, PaginationModel, QueryParams, QueryValue,
        RequestContext, UrlBuilder,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
