use std::time::Duration;
use tempfile::TempDir;
use trek_prefs::{PreferenceStore, Preferences, PrefsError};

#[tokio::test]
async fn missing_file_loads_defaults() {
    let temp = TempDir::new().unwrap();
    let store = PreferenceStore::open(temp.path().join("prefs.json")).await.unwrap();

    assert_eq!(store.load().await.unwrap(), Preferences::default());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn saved_preferences_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/prefs.json");

    let store = PreferenceStore::open(&path).await.unwrap();
    store.save(&Preferences { dark_mode: true }).await.unwrap();

    let reopened = PreferenceStore::open(&path).await.unwrap();
    assert!(reopened.load().await.unwrap().dark_mode);
}

#[tokio::test]
async fn toggle_flips_and_persists() {
    let temp = TempDir::new().unwrap();
    let store = PreferenceStore::open(temp.path().join("prefs.json")).await.unwrap();

    assert!(store.toggle_dark_mode().await.unwrap().dark_mode);
    assert!(store.load().await.unwrap().dark_mode);

    assert!(!store.toggle_dark_mode().await.unwrap().dark_mode);
    assert!(!store.load().await.unwrap().dark_mode);
}

#[tokio::test]
async fn malformed_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefs.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = PreferenceStore::open(&path).await.unwrap();
    assert!(matches!(store.load().await, Err(PrefsError::Json { .. })));
}

#[tokio::test]
async fn stale_temp_files_are_purged_on_open() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefs.json");
    let orphan = temp.path().join("prefs.json.trektmp.1.1");
    let unrelated = temp.path().join("other.json.trektmp.1.1");
    std::fs::write(&orphan, b"{}").unwrap();
    std::fs::write(&unrelated, b"{}").unwrap();

    PreferenceStore::open_with_threshold(&path, Duration::ZERO).await.unwrap();

    assert!(!orphan.exists(), "orphaned temp file should be removed");
    assert!(unrelated.exists(), "temp files of other targets are left alone");
}

#[tokio::test]
async fn directory_path_is_rejected() {
    let err = PreferenceStore::open("..").await.unwrap_err();
    assert!(matches!(err, PrefsError::InvalidPath { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_saves_keep_the_last_requested_value() {
    let temp = TempDir::new().unwrap();
    let store = PreferenceStore::open(temp.path().join("prefs.json")).await.unwrap();

    for round in 0..100 {
        let dark = tokio::spawn(store.save(&Preferences { dark_mode: true }));
        let light = tokio::spawn(store.save(&Preferences { dark_mode: false }));
        dark.await.unwrap().unwrap();
        light.await.unwrap().unwrap();

        assert!(!store.load().await.unwrap().dark_mode, "round {round} kept a stale value");
    }
}

#[tokio::test]
async fn older_save_finishing_late_is_dropped() {
    let temp = TempDir::new().unwrap();
    let store = PreferenceStore::open(temp.path().join("prefs.json")).await.unwrap();

    let older = store.save(&Preferences { dark_mode: false });
    let newer = store.save(&Preferences { dark_mode: true });
    newer.await.unwrap();
    older.await.unwrap();

    assert!(store.load().await.unwrap().dark_mode);
}
