//! Testing utilities for casework workspace
//!
//! Shared fixtures, query helpers and proptest strategies.

#![allow(missing_docs)]

use casework_query::QueryParams;
use casework_taxonomy::{Taxonomy, TaxonomyNode, TaxonomyTable, Tier};
use proptest::prelude::*;

/// Small taxonomy with a childless area and a childless type:
///
/// ```text
/// north ── roads ── potholes, closures
///       └─ parks
/// south ── drains ── blockages
/// east
/// ```
pub fn sample_table() -> TaxonomyTable {
    TaxonomyTable {
        areas: vec![
            TaxonomyNode::root("north", "North"),
            TaxonomyNode::root("south", "South"),
            TaxonomyNode::root("east", "East"),
        ],
        types: vec![
            TaxonomyNode::child("roads", "Roads", "north"),
            TaxonomyNode::child("parks", "Parks", "north"),
            TaxonomyNode::child("drains", "Drains", "south"),
        ],
        subtypes: vec![
            TaxonomyNode::child("potholes", "Potholes", "roads"),
            TaxonomyNode::child("closures", "Closures", "roads"),
            TaxonomyNode::child("blockages", "Blockages", "drains"),
        ],
    }
}

pub fn sample_taxonomy() -> Taxonomy {
    Taxonomy::new(sample_table()).unwrap()
}

/// Build query parameters from `(key, value)` pairs, repeating keys as lists
pub fn query(pairs: &[(&str, &str)]) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in pairs {
        params.append(*key, *value);
    }
    params
}

/// Ids of a tier in declaration order
pub fn ids(taxonomy: &Taxonomy, tier: Tier) -> Vec<String> {
    taxonomy.nodes(tier).map(|node| node.id.clone()).collect()
}

/// Random query over the sample taxonomy's ids plus unrelated keys
///
/// Pairs are drawn from the area/type/subtype keys (known and unknown ids),
/// a `page` key and a free-text `q` key, in random order.
pub fn arb_query() -> impl Strategy<Value = QueryParams> {
    let taxonomy = sample_taxonomy();
    let mut choices: Vec<(&'static str, String)> = Vec::new();
    for (tier, key) in [(Tier::Area, "area"), (Tier::Type, "type"), (Tier::Subtype, "subtype")] {
        for id in ids(&taxonomy, tier) {
            choices.push((key, id));
        }
        choices.push((key, format!("unknown-{key}")));
    }
    let extra = prop_oneof![
        (1..20u32).prop_map(|page| ("page", page.to_string())),
        "[a-z ]{1,8}".prop_map(|text| ("q", text)),
    ];
    let pair = prop_oneof![
        3 => proptest::sample::select(choices),
        1 => extra,
    ];
    proptest::collection::vec(pair, 0..8).prop_map(|pairs| {
        let mut params = QueryParams::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    })
}
