use std::fs;
use std::path::Path;

use catalog_ingest::{CatalogSources, IngestError, load_catalog};

fn write_catalog(dir: &Path) {
    fs::write(
        dir.join("dataset.csv"),
        "id,title,authors,categories,format\n1,Dune,\"[1]\",\"[10]\",5\n",
    )
    .unwrap();
    fs::write(dir.join("authors.csv"), "author_id,author_name\n1,Frank Herbert\n").unwrap();
    fs::write(dir.join("categories.csv"), "category_id,category_name\n10,Fiction\n").unwrap();
    fs::write(dir.join("formats.csv"), "format_id,format_name\n5,Hardcover\n").unwrap();
}

#[test]
fn discovers_and_loads_all_four_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());

    let sources = CatalogSources::discover(dir.path()).expect("discover");
    assert_eq!(sources.books, dir.path().join("dataset.csv"));

    let catalog = load_catalog(&sources).expect("load");
    assert_eq!(catalog.books.height(), 1);
    assert_eq!(catalog.books.width(), 5);
    assert_eq!(catalog.authors.height(), 1);
    assert_eq!(catalog.categories.height(), 1);
    assert_eq!(catalog.formats.height(), 1);
}

#[test]
fn missing_lookup_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    fs::remove_file(dir.path().join("formats.csv")).unwrap();

    let err = CatalogSources::discover(dir.path()).unwrap_err();
    match err {
        IngestError::FileNotFound { path } => {
            assert_eq!(path, dir.path().join("formats.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = CatalogSources::discover(&missing).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}
