//! Integration tests for topic-tracker
//!
//! Every test points storage and catalog at a temporary directory so user
//! data is never touched.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use topic_tracker::{
    Catalog, Config, LocalStorage, PageTracker, TopicId, TopicState, TopicStore, open_tracker,
};

/// Helper to build a config whose files all live under `temp_dir`
fn isolated_config(temp_dir: &TempDir) -> Config {
    Config {
        storage_file: Some(temp_dir.path().join("local_storage.json")),
        catalog_file: Some(temp_dir.path().join("topics.toml")),
        ..Config::default()
    }
}

fn storage_path(config: &Config) -> PathBuf {
    config.storage_file().unwrap()
}

fn open(config: &Config) -> PageTracker {
    let catalog = Catalog::load_from(&config.catalog_file().unwrap()).unwrap();
    open_tracker(config, &catalog)
}

fn seed_storage(config: &Config, raw: &str) {
    let mut storage = LocalStorage::open(storage_path(config)).unwrap();
    storage.set_item(&config.storage_key, raw).unwrap();
}

#[test]
fn test_fresh_storage_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);

    let tracker = open(&config);

    assert!(tracker.is_storage_available());
    assert_eq!(tracker.completed_count(), 0);
    for button in tracker.view().buttons() {
        assert_eq!(button.label, "Mark as completed");
        assert!(!button.is_completed());
    }
    assert!(!storage_path(&config).exists());
}

#[test]
fn test_toggle_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);

    let mut tracker = open(&config);
    let state = tracker.toggle(&TopicId::new("loops")).unwrap();
    assert_eq!(state, TopicState::Completed);
    drop(tracker);

    let reopened = open(&config);
    assert!(reopened.is_completed("loops"));
    assert!(!reopened.is_completed("arrays"));

    let button = reopened.view().button("loops").unwrap();
    assert_eq!(button.label, "Completed!");
    assert!(button.is_completed());
    assert!(reopened.view().sidebar_entry("loops").unwrap().is_completed());
}

#[test]
fn test_persisted_layout_is_json_array_string() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);

    let mut tracker = open(&config);
    tracker.toggle(&TopicId::new("loops")).unwrap();

    let content = std::fs::read_to_string(storage_path(&config)).unwrap();
    let file: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(file["topicsCompleted"], serde_json::json!(r#"["loops"]"#));
}

#[test]
fn test_existing_progress_renders_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);
    seed_storage(&config, r#"["loops","arrays"]"#);

    let mut tracker = open(&config);
    assert!(tracker.is_completed("loops"));
    assert!(tracker.is_completed("arrays"));
    assert!(!tracker.is_completed("functions"));

    let completed: Vec<_> = tracker
        .view()
        .sidebar()
        .iter()
        .filter(|e| e.is_completed())
        .map(|e| e.topic.to_string())
        .collect();
    assert_eq!(completed, vec!["loops", "arrays"]);

    // Un-completing keeps the other entry in place
    tracker.toggle(&TopicId::new("loops")).unwrap();
    let slot = tracker.store().unwrap();
    assert_eq!(slot.raw(), Some(r#"["arrays"]"#));
    assert_eq!(slot.load().unwrap(), vec!["arrays"]);
}

#[test]
fn test_malformed_storage_value_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);
    seed_storage(&config, "{not an array");

    let mut tracker = open(&config);
    assert!(tracker.is_storage_available());
    assert_eq!(tracker.completed_count(), 0);

    // The next write replaces the broken value
    tracker.toggle(&TopicId::new("events")).unwrap();
    let reopened = open(&config);
    assert_eq!(reopened.completed_topics(), vec![TopicId::new("events")]);
}

#[test]
fn test_reset_removes_key() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_config(&temp_dir);
    seed_storage(&config, r#"["loops","arrays"]"#);

    let mut tracker = open(&config);
    tracker.reset().unwrap();
    assert_eq!(tracker.completed_count(), 0);
    assert!(tracker.view().sidebar().iter().all(|e| !e.is_completed()));

    let storage = LocalStorage::open(storage_path(&config)).unwrap();
    assert_eq!(storage.get_item("topicsCompleted"), None);
}

#[test]
fn test_disabled_storage_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        storage_enabled: false,
        ..isolated_config(&temp_dir)
    };

    let mut tracker = open(&config);
    assert!(!tracker.is_storage_available());

    let state = tracker.toggle(&TopicId::new("loops")).unwrap();
    assert_eq!(state, TopicState::NotCompleted);
    assert!(!tracker.is_completed("loops"));
    assert_eq!(
        tracker.view().button("loops").unwrap().label,
        "Mark as completed"
    );
    assert!(!storage_path(&config).exists());
}

#[test]
fn test_custom_catalog_and_storage_key() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        storage_key: "courseProgress".to_string(),
        ..isolated_config(&temp_dir)
    };
    std::fs::write(
        config.catalog_file().unwrap(),
        r#"
[[topics]]
id = "intro"
title = "Introduction"

[[topics]]
id = "streams"
title = "Streams"
solution = "readable.pipe(writable);"
"#,
    )
    .unwrap();

    let mut tracker = open(&config);
    assert_eq!(tracker.view().sidebar().len(), 2);
    assert!(tracker.view().solution("streams").is_some());

    tracker.toggle(&TopicId::new("streams")).unwrap();

    let storage = LocalStorage::open(storage_path(&config)).unwrap();
    assert_eq!(storage.get_item("courseProgress"), Some(r#"["streams"]"#));
    assert_eq!(storage.get_item("topicsCompleted"), None);
}

#[test]
fn test_config_file_layer() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let written = Config {
        storage_key: "fromFile".to_string(),
        ui_refresh_fps: 30,
        ..isolated_config(&temp_dir)
    };
    written.save_to(&config_path).unwrap();

    let loaded = Config::load_from(&config_path).unwrap();
    assert_eq!(loaded.storage_key, "fromFile");
    assert_eq!(loaded.ui_refresh_fps, 30);
    assert_eq!(loaded.storage_file, written.storage_file);
    assert!(loaded.storage_enabled);
}
