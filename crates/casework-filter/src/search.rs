//! Free-text search clauses
//!
//! Each whitespace-separated term must appear in at least one searchable
//! field; all terms must match. Taxonomy filters broaden across tiers, but
//! independent search terms narrow.

use crate::field_path::FieldPath;
use crate::where_clause::WhereClause;

/// `AND` over terms of `OR` over fields
///
/// Returns `None` for blank text or when there are no fields to search.
#[must_use]
pub fn create_search_where_clause(text: &str, fields: &[FieldPath]) -> Option<WhereClause> {
    if fields.is_empty() {
        return None;
    }

    let terms: Vec<WhereClause> = text
        .split_whitespace()
        .map(|term| {
            WhereClause::Or(
                fields
                    .iter()
                    .map(|field| WhereClause::field_contains(field.clone(), term))
                    .collect(),
            )
        })
        .collect();

    if terms.is_empty() {
        return None;
    }

    tracing::debug!(terms = terms.len(), fields = fields.len(), "built search clause");
    Some(WhereClause::And(terms))
}

/// Conjunction of the clauses that are present
///
/// No clauses → `None`; one → that clause unchanged; several → `AND`.
#[must_use]
pub fn combine_where_clauses(
    clauses: impl IntoIterator<Item = Option<WhereClause>>,
) -> Option<WhereClause> {
    let mut present: Vec<WhereClause> = clauses.into_iter().flatten().collect();
    match present.len() {
        0 => None,
        1 => present.pop(),
        _ => Some(WhereClause::And(present)),
    }
}
