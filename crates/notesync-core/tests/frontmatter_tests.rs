//! Integration tests for metadata merging

use chrono::NaiveDate;
use notesync_content::Metadata;
use notesync_core::{MetadataContext, merge_metadata};
use notesync_fs::NormalizedPath;
use notesync_meta::{Location, Platform, SyncConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_yaml::Value;

fn meta(yaml: &str) -> Metadata {
    serde_yaml::from_str(yaml).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn merge_into(location: Location, source: &Metadata, target: &Metadata, file: &str) -> Metadata {
    let config = SyncConfig::default();
    let path = NormalizedPath::new(file);
    let ctx = MetadataContext {
        location,
        required_keys: config.required_keys(location),
        note_type: "book",
        file_path: &path,
        today: today(),
    };
    merge_metadata(source, target, &ctx)
}

#[test]
fn test_missing_title_from_file_name() {
    let out = merge_into(
        Platform::Personal.into(),
        &Metadata::new(),
        &Metadata::new(),
        "obsidian/Notes/my-note.md",
    );
    assert_eq!(out["title"], Value::String("My Note".into()));
}

#[test]
fn test_required_defaults_for_publish() {
    let out = merge_into(
        Platform::Publish.into(),
        &meta("title: Dune\ntags: [a, b]"),
        &Metadata::new(),
        "quarto/posts/dune.md",
    );

    assert_eq!(
        out,
        meta("title: Dune\ntags: [a, b]\nformat: html\ndate: '2024-03-01'\ncategories: [a, b]")
    );
}

#[test]
fn test_publish_backfills_empty_categories() {
    let out = merge_into(
        Platform::Publish.into(),
        &meta("tags: a, b"),
        &meta("title: Dune\ncategories: []\nformat: html\ndate: '2024-01-01'"),
        "quarto/posts/dune.md",
    );
    assert_eq!(out["categories"], meta("v: [a, b]")["v"]);
    assert_eq!(out["date"], Value::String("2024-01-01".into()));
}

#[test]
fn test_target_required_keys_win() {
    let out = merge_into(
        Platform::Outline.into(),
        &meta("title: New Title\ntype: article\nrating: 5"),
        &meta("title: Old Title\ntype: book\nrating: 3"),
        "logseq/pages/x.md",
    );
    assert_eq!(out, meta("title: Old Title\ntype: book\nrating: 5"));
}

#[test]
fn test_outline_type_default_is_note_type() {
    let out = merge_into(
        Platform::Outline.into(),
        &meta("title: X"),
        &Metadata::new(),
        "logseq/pages/x.md",
    );
    assert_eq!(out["type"], Value::String("book".into()));
}

#[test]
fn test_tags_from_categories() {
    let out = merge_into(
        Platform::Personal.into(),
        &meta("title: X\ncategories: essays, draft"),
        &Metadata::new(),
        "obsidian/Notes/x.md",
    );
    assert_eq!(out["tags"], meta("v: [essays, draft]")["v"]);
    assert_eq!(out["created"], Value::String("2024-03-01".into()));
}

#[test]
fn test_content_has_no_required_keys() {
    let out = merge_into(Location::Content, &meta("a: 1"), &Metadata::new(), "content/pages/x.md");
    assert_eq!(out, meta("a: 1"));
}

fn metadata_strategy() -> impl Strategy<Value = Metadata> {
    let key = prop_oneof![
        Just("title"),
        Just("type"),
        Just("tags"),
        Just("categories"),
        Just("date"),
        Just("created"),
        Just("format"),
        Just("rating"),
    ];
    let value = prop_oneof![
        "[a-z, ]{0,8}".prop_map(Value::String),
        Just(Value::Null),
        prop::collection::vec("[a-z]{1,4}".prop_map(Value::String), 0..3).prop_map(Value::Sequence),
    ];
    prop::collection::btree_map(key.prop_map(str::to_string), value, 0..6)
}

fn location_strategy() -> impl Strategy<Value = Location> {
    prop_oneof![
        Just(Location::Content),
        Just(Location::Platform(Platform::Outline)),
        Just(Location::Platform(Platform::Personal)),
        Just(Location::Platform(Platform::Publish)),
    ]
}

proptest! {
    #[test]
    fn prop_merge_is_idempotent(
        source in metadata_strategy(),
        target in metadata_strategy(),
        location in location_strategy(),
    ) {
        let once = merge_into(location, &source, &target, "dir/some-note.md");
        let twice = merge_into(location, &source, &once, "dir/some-note.md");
        prop_assert_eq!(twice, once);
    }
}
