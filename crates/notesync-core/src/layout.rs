//! Target path layout
//!
//! Every platform lays its notes out differently: the outline tree mirrors
//! the source's relative paths, the personal tree files notes into category
//! folders, and the publishing tree splits interactive notes (`.qmd`) from
//! plain posts. All paths here are relative to the vault root.

use notesync_content::Metadata;
use notesync_fs::NormalizedPath;
use notesync_meta::transform::as_list;
use notesync_meta::{Location, Platform, SyncConfig};
use serde_yaml::Value;

const INTERACTIVE_EXTENSION: &str = "qmd";
const MARKDOWN_EXTENSION: &str = "md";

fn strings(value: &Value) -> Vec<String> {
    match as_list(value) {
        Value::Sequence(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Category folder of a note on the personal platform.
///
/// The lowercase `type` selects a folder first, then the first tag that
/// names one, then the default folder.
pub fn target_folder(config: &SyncConfig, metadata: &Metadata) -> String {
    let note_type = metadata
        .get("type")
        .and_then(Value::as_str)
        .map(|t| t.trim().to_lowercase());

    if let Some(folder) = note_type.as_deref().and_then(|t| config.folder(t)) {
        return folder.to_string();
    }

    let tags = metadata.get("tags").map(strings).unwrap_or_default();
    tags.iter()
        .find_map(|tag| config.folder(&tag.to_lowercase()))
        .unwrap_or_else(|| config.default_folder())
        .to_string()
}

/// Whether a note belongs in the publishing tree's visualization dir.
pub fn is_interactive(metadata: &Metadata) -> bool {
    let flagged = match metadata.get("interactive") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    };
    flagged
        || metadata
            .get("tags")
            .map(strings)
            .unwrap_or_default()
            .iter()
            .any(|t| t == "visualization")
}

fn publish_path(config: &SyncConfig, file_name: &str, metadata: &Metadata) -> NormalizedPath {
    let file = NormalizedPath::new(file_name);
    if is_interactive(metadata) {
        let file = if file.extension() == Some(MARKDOWN_EXTENSION) {
            file.with_extension(INTERACTIVE_EXTENSION)
        } else {
            file
        };
        NormalizedPath::new(config.visualization_dir()).join(file.as_str())
    } else {
        NormalizedPath::new(&config.publish.target_dir).join(file_name)
    }
}

fn personal_path(config: &SyncConfig, file_name: &str, metadata: &Metadata) -> NormalizedPath {
    NormalizedPath::new(&config.personal.target_dir)
        .join(&target_folder(config, metadata))
        .join(file_name)
}

/// Path a source note maps to at `target`.
///
/// `source_file` and `source_dir` are vault-relative; `source_dir` is the
/// tree the note was read from.
pub fn resolve_target_path(
    config: &SyncConfig,
    source_file: &NormalizedPath,
    source_dir: &str,
    target: Location,
    metadata: &Metadata,
) -> NormalizedPath {
    let file_name = source_file.file_name().unwrap_or_default();
    let dir = |location: Location| NormalizedPath::new(config.dir(location));
    let fallback = || dir(target).join(file_name);

    let source_root = NormalizedPath::new(source_dir);
    let from_publish = source_root.is_within_dir(&config.publish.target_dir)
        || source_root.is_within_dir(config.visualization_dir());
    let from_personal = source_root.is_within_dir(&config.personal.target_dir);

    if from_publish {
        let name = NormalizedPath::new(file_name);
        let name = if name.extension() == Some(INTERACTIVE_EXTENSION) {
            name.with_extension(MARKDOWN_EXTENSION)
        } else {
            name
        };
        match target {
            Location::Platform(Platform::Outline) | Location::Content => dir(target).join(name.as_str()),
            Location::Platform(Platform::Personal) => personal_path(config, name.as_str(), metadata),
            Location::Platform(Platform::Publish) => fallback(),
        }
    } else if from_personal {
        match target {
            Location::Platform(Platform::Publish) => publish_path(config, file_name, metadata),
            _ => fallback(),
        }
    } else {
        match target {
            Location::Platform(Platform::Outline) => {
                let relative = source_file
                    .strip_prefix(&source_root)
                    .unwrap_or_else(|| NormalizedPath::new(file_name));
                dir(target).join(relative.as_str())
            }
            Location::Platform(Platform::Personal) => personal_path(config, file_name, metadata),
            Location::Platform(Platform::Publish) => publish_path(config, file_name, metadata),
            Location::Content => fallback(),
        }
    }
}
