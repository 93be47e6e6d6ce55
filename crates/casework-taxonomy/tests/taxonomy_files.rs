//! Loading taxonomies from files on disk.

use std::io::Write;

use casework_taxonomy::{reference, Taxonomy, TaxonomyError, Tier, REFERENCE_YAML};
use pretty_assertions::assert_eq;

fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_yaml_file() {
    let file = write_file(".yaml", REFERENCE_YAML);
    let taxonomy = Taxonomy::from_path(file.path()).unwrap();
    assert_eq!(&taxonomy, reference().unwrap());
}

#[test]
fn loads_json_file() {
    let json = serde_json::to_string(reference().unwrap()).unwrap();
    let file = write_file(".json", &json);
    let taxonomy = Taxonomy::from_path(file.path()).unwrap();
    assert_eq!(taxonomy.len(Tier::Subtype), reference().unwrap().len(Tier::Subtype));
}

#[test]
fn rejects_unknown_extension() {
    let file = write_file(".txt", REFERENCE_YAML);
    assert!(matches!(
        Taxonomy::from_path(file.path()),
        Err(TaxonomyError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Taxonomy::from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, TaxonomyError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn invalid_yaml_is_reported() {
    let file = write_file(".yml", "areas: [ {id: a1");
    assert!(matches!(
        Taxonomy::from_path(file.path()),
        Err(TaxonomyError::InvalidYaml(_))
    ));
}

#[test]
fn validation_errors_surface_through_files() {
    let file = write_file(
        ".yaml",
        "areas:\n  - id: a1\n    displayName: A\ntypes:\n  - id: t1\n    displayName: T\n    parentId: nowhere\n",
    );
    let err = Taxonomy::from_path(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "type 't1' references unknown parent 'nowhere'");
}
