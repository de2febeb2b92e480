//! Integration tests for vault configuration loading

use std::fs;

use notesync_fs::NormalizedPath;
use notesync_meta::{Location, Platform, SyncConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_config(temp: &TempDir, name: &str, content: &str) -> NormalizedPath {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_discover_without_config_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = SyncConfig::discover(&NormalizedPath::new(temp.path()), None).unwrap();
    assert_eq!(config, SyncConfig::default());
}

#[test]
fn test_discover_vault_config() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "notesync.toml",
        r#"
content_dir = "canon"

[personal]
target_dir = "vault"

[personal.folders]
recipe = "Recipes"
"#,
    );

    let config = SyncConfig::discover(&NormalizedPath::new(temp.path()), None).unwrap();

    assert_eq!(config.dir(Location::Content), "canon");
    assert_eq!(config.dir(Platform::Personal.into()), "vault");
    assert_eq!(config.folder("recipe"), Some("Recipes"));
    // Untouched values keep their defaults
    assert_eq!(config.folder("book"), Some("Books"));
    assert_eq!(
        config.required_keys(Platform::Personal.into()),
        ["title", "tags", "created"]
    );
}

#[test]
fn test_legacy_table_names() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        "custom.yaml",
        "quarto:\n  target_dir: site/posts\n  required_keys: [title]\n",
    );

    let config = SyncConfig::load(&path).unwrap();

    assert_eq!(config.publish.target_dir, "site/posts");
    assert_eq!(config.required_keys(Platform::Publish.into()), ["title"]);
}

#[test]
fn test_explicit_missing_config_is_error() {
    let temp = TempDir::new().unwrap();
    let missing = NormalizedPath::new(temp.path().join("nope.toml"));
    assert!(SyncConfig::discover(&NormalizedPath::new(temp.path()), Some(&missing)).is_err());
}

#[test]
fn test_malformed_config_is_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "notesync.toml", "content_dir = [");
    assert!(SyncConfig::load(&path).is_err());
}
