//! Metadata merging against a platform's required keys

use chrono::NaiveDate;
use notesync_content::Metadata;
use notesync_content::section::title_case;
use notesync_fs::NormalizedPath;
use notesync_meta::transform::{as_list, is_blank};
use notesync_meta::{Location, Platform};
use serde_yaml::Value;

/// Everything the merge needs besides the two metadata maps.
#[derive(Debug, Clone, Copy)]
pub struct MetadataContext<'a> {
    /// Where the merged note is written
    pub location: Location,
    /// Required keys of that location
    pub required_keys: &'a [String],
    /// Note type detected from the source
    pub note_type: &'a str,
    /// Path of the note being written; its stem seeds a missing title
    pub file_path: &'a NormalizedPath,
    pub today: NaiveDate,
}

/// Title derived from a file name: `my-note.md` -> `My Note`.
pub fn title_from_path(path: &NormalizedPath) -> Option<String> {
    let stem = path.file_stem()?;
    let title = title_case(&stem.replace(['-', '_'], " "));
    (!title.is_empty()).then_some(title)
}

fn string(value: impl Into<String>) -> Value {
    Value::String(value.into())
}

/// Default for a required key missing from the merged metadata.
fn default_for(key: &str, source: &Metadata, ctx: &MetadataContext<'_>) -> Value {
    match key {
        "title" => title_from_path(ctx.file_path).map_or_else(|| string(""), Value::String),
        "date" | "created" => string(ctx.today.format("%Y-%m-%d").to_string()),
        "format" => string("html"),
        "type" => string(ctx.note_type),
        "tags" => source
            .get("categories")
            .map_or_else(|| Value::Sequence(Vec::new()), as_list),
        "categories" => source
            .get("tags")
            .map_or_else(|| Value::Sequence(Vec::new()), as_list),
        _ => string(""),
    }
}

/// Merge source metadata onto target metadata.
///
/// The target is the base. Source keys overwrite it, except required keys
/// the target already has. Required keys still missing afterwards get
/// synthesized defaults.
pub fn merge_metadata(source: &Metadata, target: &Metadata, ctx: &MetadataContext<'_>) -> Metadata {
    let is_required = |key: &str| ctx.required_keys.iter().any(|k| k == key);

    let mut merged = target.clone();
    for (key, value) in source {
        if is_required(key) && target.contains_key(key) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }

    for key in ctx.required_keys {
        if !merged.contains_key(key) {
            let value = default_for(key, source, ctx);
            tracing::debug!(key = %key, "defaulted required key");
            merged.insert(key.clone(), value);
        }
    }

    if ctx.location == Location::Platform(Platform::Publish)
        && let Some(tags) = source.get("tags").filter(|t| !is_blank(t))
        && merged.get("categories").is_none_or(is_blank)
    {
        merged.insert("categories".to_string(), as_list(tags));
    }

    merged
}
