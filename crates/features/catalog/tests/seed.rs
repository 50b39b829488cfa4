#![cfg(feature = "server")]

use std::io::Write;
use trek_catalog::service::{load, seed_if_empty};
use trek_catalog::{CatalogError, DestinationDraft, MemoryStore, service};

const SEED: &str = r#"[
    {"id": "ignored", "name": "Paris Getaway", "country": "France", "budget": 450,
     "image": "https://img.example/paris.jpg", "description": "Museums"},
    {"name": "", "country": "Nowhere", "budget": 1, "image": "x", "description": "x"},
    {"name": "Tokyo Lights", "country": "Japan", "budget": "1200",
     "image": "https://img.example/tokyo.jpg", "additionalImage2": "https://img.example/shibuya.jpg",
     "description": "Neon"}
]"#;

fn seed_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn seeds_valid_entries_into_empty_store() {
    let store = MemoryStore::new();
    let file = seed_file(SEED);

    let imported = seed_if_empty(&store, file.path()).await.unwrap();

    assert_eq!(imported, 2);
    let records = load(&store).await.unwrap();
    assert_eq!(records[0].name, "Paris Getaway");
    assert_ne!(records[0].id, "ignored");
    assert_eq!(records[1].budget, 1200.0);
    assert_eq!(records[1].additional_images().collect::<Vec<_>>(), ["https://img.example/shibuya.jpg"]);
}

#[tokio::test]
async fn populated_store_is_left_alone() {
    let store = MemoryStore::new();
    let draft = DestinationDraft {
        name: "Existing".to_owned(),
        country: "Chile".to_owned(),
        budget: 10.0,
        image: "https://img.example/e.jpg".to_owned(),
        description: "Already here".to_owned(),
        ..DestinationDraft::default()
    };
    service::submit(&store, draft).await.unwrap();

    let imported = seed_if_empty(&store, seed_file(SEED).path()).await.unwrap();

    assert_eq!(imported, 0);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn malformed_or_missing_file_is_reported() {
    let store = MemoryStore::new();

    let malformed = seed_if_empty(&store, seed_file("{ not json").path()).await;
    assert!(matches!(malformed, Err(CatalogError::Json { .. })));

    let dir = tempfile::tempdir().unwrap();
    let missing = seed_if_empty(&store, &dir.path().join("absent.json")).await;
    assert!(matches!(missing, Err(CatalogError::Io { .. })));
    assert!(store.is_empty());
}
