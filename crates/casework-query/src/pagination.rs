//! Pagination view model
//!
//! Computes the abbreviated page window shown under a listing: first and
//! last page, the current page with one neighbour either side, and ellipsis
//! markers over the gaps. Every link keeps the request's other query
//! parameters.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::QueryError;
use crate::query::QueryParams;
use crate::request::RequestContext;
use crate::url_builder::UrlBuilder;

/// Query key carrying the page number
pub const PAGE_KEY: &str = "page";

/// Link to another page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// Target URL
    pub href: String,
}

/// One entry of the page window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationItem {
    /// Numbered page
    Page {
        /// 1-based page number
        number: u32,
        /// Link to the page
        href: String,
        /// True for the page being shown
        current: bool,
    },

    /// Gap marker
    Ellipsis,
}

impl PaginationItem {
    /// Page number, `None` for an ellipsis
    #[inline]
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Page { number, .. } => Some(*number),
            Self::Ellipsis => None,
        }
    }

    /// True for [`PaginationItem::Ellipsis`]
    #[inline]
    #[must_use]
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

// Templates expect `{number, href, current}` or `{ellipsis: true}`.
impl Serialize for PaginationItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page {
                number,
                href,
                current,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("number", number)?;
                map.serialize_entry("href", href)?;
                map.serialize_entry("current", current)?;
                map.end()
            }
            Self::Ellipsis => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ellipsis", &true)?;
                map.end()
            }
        }
    }
}

/// Previous/next links and page window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationModel {
    /// Link to the previous page
    pub previous: Option<PageLink>,

    /// Link to the next page
    pub next: Option<PageLink>,

    /// Page window
    pub items: Vec<PaginationItem>,
}

impl PaginationModel {
    /// Page numbers in the window, ellipses skipped
    #[must_use]
    pub fn page_numbers(&self) -> Vec<u32> {
        self.items.iter().filter_map(PaginationItem::number).collect()
    }
}

/// Build the pagination model for a listing request
///
/// With one page or fewer there is nothing to navigate and the model is
/// empty. Otherwise pages 1 and `total_pages` are always present, along with
/// every page within one of `current_page`; gaps are marked by
/// [`PaginationItem::Ellipsis`].
#[must_use]
pub fn get_pagination_model(
    request: &RequestContext,
    total_pages: u32,
    current_page: u32,
) -> PaginationModel {
    if total_pages <= 1 {
        return PaginationModel::default();
    }

    let base = page_url_base(request);
    let page_item = |number: u32| PaginationItem::Page {
        number,
        href: page_href(&base, number),
        current: number == current_page,
    };

    let mut items = vec![page_item(1)];
    if current_page > 3 {
        items.push(PaginationItem::Ellipsis);
    }

    let window_start = current_page.saturating_sub(1).max(2);
    let window_end = current_page.saturating_add(1).min(total_pages - 1);
    items.extend((window_start..=window_end).map(&page_item));

    if current_page.saturating_add(2) < total_pages {
        items.push(PaginationItem::Ellipsis);
    }
    items.push(page_item(total_pages));

    let previous = (current_page > 1).then(|| PageLink {
        href: page_href(&base, current_page - 1),
    });
    let next = (current_page < total_pages).then(|| PageLink {
        href: page_href(&base, current_page + 1),
    });

    tracing::debug!(
        total_pages,
        current_page,
        items = items.len(),
        "built pagination model"
    );

    PaginationModel {
        previous,
        next,
        items,
    }
}

/// Request path plus every query parameter except the page number
fn page_url_base(request: &RequestContext) -> UrlBuilder {
    UrlBuilder::new(request.full_path()).add_query_params(&request.query.without(PAGE_KEY))
}

fn page_href(base: &UrlBuilder, page: u32) -> String {
    base.clone()
        .add_query_param(PAGE_KEY, page.to_string())
        .to_string()
}

/// Page number and size of a listing request
///
/// Bridges the request query to the storage layer's skip/take arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Create page request
    ///
    /// A page below 1 is raised to 1.
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroPageSize`] when `page_size` is zero
    pub fn new(page: u32, page_size: u32) -> Result<Self, QueryError> {
        if page_size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        Ok(Self {
            page: page.max(1),
            page_size,
        })
    }

    /// Read the page number from the `page` query key
    ///
    /// Missing, malformed and non-positive values read as page 1.
    ///
    /// # Errors
    /// Returns [`QueryError::ZeroPageSize`] when `page_size` is zero
    pub fn from_query(query: &QueryParams, page_size: u32) -> Result<Self, QueryError> {
        let page = query
            .first(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(1);
        Self::new(page, page_size)
    }

    /// 1-based page number
    #[inline]
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Items to skip before this page
    #[inline]
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Items to take for this page
    #[inline]
    #[must_use]
    pub fn take(&self) -> u32 {
        self.page_size
    }

    /// Number of pages needed for `total_items`
    #[must_use]
    pub fn total_pages(&self, total_items: u64) -> u32 {
        let pages = total_items.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Same size, page clamped into `1..=total_pages`
    #[must_use]
    pub fn clamped(&self, total_pages: u32) -> Self {
        Self {
            page: self.page.min(total_pages.max(1)),
            page_size: self.page_size,
        }
    }
}
