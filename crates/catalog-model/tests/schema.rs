use std::fs;

use catalog_model::{BookSchema, ColumnType, SchemaError, load_book_schema};

#[test]
fn loads_schema_from_json_object() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{ "rating-avg": "real", "publication-date": "datetime", "isbn13": "text" }"#,
    )
    .expect("write schema");

    let schema = load_book_schema(&path).expect("load schema");

    assert_eq!(schema.len(), 3);
    assert_eq!(schema.column_type("rating-avg"), Some(ColumnType::Real));
    assert_eq!(
        schema.column_type("publication-date"),
        Some(ColumnType::Datetime)
    );
    assert_eq!(schema.column_type("isbn13"), Some(ColumnType::Text));
}

#[test]
fn rejects_unknown_column_type() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schema.json");
    fs::write(&path, r#"{ "rating-avg": "decimal" }"#).expect("write schema");

    let result = load_book_schema(&path);

    assert!(matches!(result, Err(SchemaError::Parse { .. })));
}

#[test]
fn rejects_blank_column_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("schema.json");
    fs::write(&path, r#"{ " ": "integer" }"#).expect("write schema");

    let result = load_book_schema(&path);

    assert!(matches!(result, Err(SchemaError::EmptyColumnName)));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_book_schema(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(SchemaError::Read { .. })));
}

#[test]
fn columns_iterate_in_name_order() {
    let schema = BookSchema::new()
        .with_column("weight", ColumnType::Real)
        .with_column("id", ColumnType::Integer);
    let names: Vec<&str> = schema.columns().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["id", "weight"]);
}
