//! Unit tests for the schema list and schema selection

use std::fs;

use mysql_add_schema::schemas::resolve_selection;
use mysql_add_schema::{SchemaCatalog, SchemaError, SchemaName};
use tempfile::TempDir;

#[test]
fn test_load_schema_list_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schemas.conf");
    fs::write(&path, "tenant_a\r\n\r\n tenant_b\n\ntenant_c   \n").unwrap();

    let catalog = SchemaCatalog::load(&path).unwrap();
    let names: Vec<&str> = catalog.schemas().iter().map(SchemaName::as_str).collect();
    assert_eq!(names, vec!["tenant_a", "tenant_b", "tenant_c"]);
}

#[test]
fn test_load_schema_list_directory_is_error() {
    let dir = TempDir::new().unwrap();
    let result = SchemaCatalog::load(dir.path());
    assert!(matches!(
        result,
        Err(SchemaError::SchemaListUnreadable { .. })
    ));
}

#[test]
fn test_select_all_preserves_file_order() {
    let catalog = SchemaCatalog::parse("zeta\nalpha\nmid\n");
    let selected = resolve_selection(&catalog, &[], true).unwrap();
    let names: Vec<String> = selected.iter().map(|s| s.to_string()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_schema_name_try_from() {
    let name = SchemaName::try_from("sales").unwrap();
    assert_eq!(name.as_ref(), "sales");

    let err = SchemaName::try_from("sales.orders").unwrap_err();
    assert!(err.to_string().contains("sales.orders"));
}
