//! Filter generation against the built-in reference taxonomy and custom
//! configurations.

use casework_filter::{FieldPath, FilterConfig, FilterGenerator, PerTier};
use casework_query::QueryParams;
use casework_taxonomy::{reference, Tier};
use casework_test_utils::{query, sample_taxonomy};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn reference_area_and_subtype_broaden() {
    let generator = FilterGenerator::with_defaults(reference().unwrap());
    let query = QueryParams::parse("area=rights-of-way&subtype=hearing");
    let clause = generator.create_filter_where_clause(&query).unwrap();
    assert_eq!(
        serde_json::to_value(&clause).unwrap(),
        json!({"AND": [{"OR": [
            {"Type": {"areaId": {"in": ["rights-of-way"]}}},
            {"subTypeId": {"in": ["hearing"]}},
        ]}]})
    );
}

#[test]
fn reference_groups_cover_every_parent_with_children() {
    let taxonomy = reference().unwrap();
    let generator = FilterGenerator::with_defaults(taxonomy);
    let view = generator.generate_filters(&QueryParams::new(), "/cases");

    let areas_with_types = taxonomy
        .nodes(Tier::Area)
        .filter(|area| taxonomy.has_children(Tier::Type, &area.id))
        .count();
    let types_with_subtypes = taxonomy
        .nodes(Tier::Type)
        .filter(|ty| taxonomy.has_children(Tier::Subtype, &ty.id))
        .count();

    assert_eq!(
        view.checkbox_groups.len(),
        1 + areas_with_types + types_with_subtypes
    );
    assert!(view.group("subtype-water-abstraction").is_none());
    assert!(view.group("subtype-commons-and-greens").is_none());
    assert!(view.checkbox_groups.iter().all(|group| !group.items.is_empty()));
    assert!(!view.has_selections());
}

#[test]
fn custom_keys_and_fields() {
    let taxonomy = sample_taxonomy();
    let config = FilterConfig::new()
        .with_keys(PerTier::new(
            "caseArea".into(),
            "caseType".into(),
            "caseSubType".into(),
        ))
        .with_labels(PerTier::new(
            "Areas".into(),
            "work types".into(),
            "issues".into(),
        ))
        .with_fields(PerTier::new(
            "CaseType.CaseArea.id".parse::<FieldPath>().unwrap(),
            FieldPath::single("caseTypeId"),
            FieldPath::single("caseSubTypeId"),
        ));
    let generator = FilterGenerator::new(&taxonomy, config).unwrap();

    let query = query(&[("caseArea", "north"), ("caseSubType", "potholes")]);
    let clause = generator.create_filter_where_clause(&query).unwrap();
    assert_eq!(
        serde_json::to_value(&clause).unwrap(),
        json!({"AND": [{"OR": [
            {"CaseType": {"CaseArea": {"id": {"in": ["north"]}}}},
            {"caseSubTypeId": {"in": ["potholes"]}},
        ]}]})
    );

    // default keys are no longer recognised
    assert_eq!(
        generator.create_filter_where_clause(&QueryParams::parse("area=north")),
        None
    );

    let view = generator.generate_filters(&query, "/work/");
    let prefixes: Vec<&str> = view
        .checkbox_groups
        .iter()
        .map(|g| g.id_prefix.as_str())
        .collect();
    assert_eq!(
        prefixes,
        vec!["caseArea", "caseType-north", "caseType-south", "caseSubType-roads", "caseSubType-drains"]
    );
    assert_eq!(view.group("caseSubType-roads").unwrap().legend, "Roads issues");

    let headings: Vec<&str> = view
        .selected_categories
        .iter()
        .map(|c| c.heading.as_str())
        .collect();
    assert_eq!(headings, vec!["Areas", "Roads issues"]);
    assert_eq!(
        view.selected_categories[1].items[0].href,
        "/work?caseArea=north"
    );
}

#[test]
fn categories_split_by_parent_in_declaration_order() {
    let taxonomy = sample_taxonomy();
    let generator = FilterGenerator::with_defaults(&taxonomy);
    // blockages (south/drains) listed before potholes (north/roads)
    let query = query(&[
        ("subtype", "blockages"),
        ("subtype", "closures"),
        ("subtype", "potholes"),
    ]);
    let view = generator.generate_filters(&query, "/cases");

    let summary: Vec<(String, Vec<String>)> = view
        .selected_categories
        .iter()
        .map(|c| {
            (
                c.heading.clone(),
                c.items.iter().map(|t| t.text.clone()).collect(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Roads subtypes".to_string(), vec!["Closures".to_string(), "Potholes".to_string()]),
            ("Drains subtypes".to_string(), vec!["Blockages".to_string()]),
        ]
    );

    let closures = &view.selected_categories[0].items[0];
    assert_eq!(closures.href, "/cases?subtype=blockages&subtype=potholes");
}

#[test]
fn page_parameter_survives_tag_removal() {
    let taxonomy = sample_taxonomy();
    let generator = FilterGenerator::with_defaults(&taxonomy);
    let query = QueryParams::parse("page=4&type=roads&q=lamp+post");
    let view = generator.generate_filters(&query, "/cases");
    let tag = view.tags().next().unwrap();
    assert_eq!(tag.text, "Roads");
    assert_eq!(tag.href, "/cases?page=4&q=lamp+post");
}

#[test]
fn view_serializes_for_templates() {
    let taxonomy = sample_taxonomy();
    let generator = FilterGenerator::with_defaults(&taxonomy);
    let view = generator.generate_filters(&QueryParams::parse("area=east"), "/cases");
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(
        value["checkboxGroups"][0],
        json!({
            "idPrefix": "area",
            "name": "area",
            "legend": "Case areas",
            "items": [
                {"value": "north", "text": "North", "checked": false},
                {"value": "south", "text": "South", "checked": false},
                {"value": "east", "text": "East", "checked": true},
            ],
        })
    );
    assert_eq!(
        value["selectedCategories"],
        json!([{"heading": "Case areas", "items": [{"text": "East", "href": "/cases"}]}])
    );
}
