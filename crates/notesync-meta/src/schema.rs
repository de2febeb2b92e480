//! Note schema: per-type, per-section sync policy
//!
//! ```json
//! {
//!   "schema_version": "1.0",
//!   "note_types": {
//!     "book": {
//!       "sections": {
//!         "quotes": { "sync": true, "logseq_format": "bullets", "obsidian_format": "blockquotes" },
//!         "private": { "sync": false, "obsidian_only": true }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Per-location options are keyed `<location>_format` and `<location>_only`,
//! where `<location>` is the platform name or its legacy application name.

use std::borrow::Cow;
use std::collections::BTreeMap;

use notesync_content::FormatStyle;
use notesync_content::document::DEFAULT_NOTE_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::Location;

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

/// Sync policy of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPolicy {
    /// Whether the section participates in sync at all
    #[serde(default = "default_true")]
    pub sync: bool,
    /// Per-location options (`<location>_format`, `<location>_only`)
    #[serde(flatten)]
    pub options: BTreeMap<String, Value>,
}

impl Default for SectionPolicy {
    fn default() -> Self {
        Self {
            sync: true,
            options: BTreeMap::new(),
        }
    }
}

impl SectionPolicy {
    fn option(&self, location: Location, suffix: &str) -> Option<&Value> {
        location
            .schema_keys()
            .into_iter()
            .find_map(|key| self.options.get(&format!("{key}_{suffix}")))
    }

    /// Format declared for a location, if any.
    ///
    /// An unrecognized format name is ignored with a warning.
    pub fn declared_format(&self, location: Location) -> Option<FormatStyle> {
        let name = self.option(location, "format")?.as_str()?;
        match name.parse() {
            Ok(style) => Some(style),
            Err(e) => {
                tracing::warn!(location = %location, "ignoring section format: {}", e);
                None
            }
        }
    }

    /// Format of this section at a location: declared, else the location default.
    pub fn format_for(&self, location: Location) -> FormatStyle {
        self.declared_format(location)
            .unwrap_or_else(|| location.default_format())
    }

    /// Whether the section is marked as existing only at a location.
    pub fn is_exclusive_to(&self, location: Location) -> bool {
        self.option(location, "only")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Sections of one note type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteTypeSchema {
    #[serde(default)]
    pub sections: BTreeMap<String, SectionPolicy>,
}

/// The note schema. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSchema {
    #[serde(default = "default_version")]
    pub schema_version: String,
    #[serde(default)]
    pub note_types: BTreeMap<String, NoteTypeSchema>,
}

impl Default for NoteSchema {
    /// The `note` type with `overview`, `notes` and `references` synced.
    fn default() -> Self {
        let sections = ["overview", "notes", "references"]
            .into_iter()
            .map(|name| (name.to_string(), SectionPolicy::default()))
            .collect();

        let mut note_types = BTreeMap::new();
        note_types.insert(DEFAULT_NOTE_TYPE.to_string(), NoteTypeSchema { sections });

        Self {
            schema_version: default_version(),
            note_types,
        }
    }
}

impl NoteSchema {
    /// Schema for a note type, falling back to the `note` type.
    pub fn note_type(&self, note_type: &str) -> Option<&NoteTypeSchema> {
        self.note_types
            .get(note_type)
            .or_else(|| self.note_types.get(DEFAULT_NOTE_TYPE))
    }

    /// Policy for a section. Unlisted sections are synced.
    pub fn section_policy(&self, note_type: &str, section: &str) -> Cow<'_, SectionPolicy> {
        match self
            .note_type(note_type)
            .and_then(|t| t.sections.get(section))
        {
            Some(policy) => Cow::Borrowed(policy),
            None => Cow::Owned(SectionPolicy::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use pretty_assertions::assert_eq;

    const PERSONAL: Location = Location::Platform(Platform::Personal);
    const OUTLINE: Location = Location::Platform(Platform::Outline);

    fn schema() -> NoteSchema {
        serde_json::from_str(
            r#"{
                "note_types": {
                    "book": {
                        "sections": {
                            "quotes": { "sync": true, "obsidian_format": "blockquotes" },
                            "private": { "sync": false, "personal_only": true },
                            "odd": { "outline_format": "tables" }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_declared_format_by_legacy_name() {
        let schema = schema();
        let policy = schema.section_policy("book", "quotes");
        assert_eq!(policy.format_for(PERSONAL), FormatStyle::Blockquotes);
        assert_eq!(policy.format_for(OUTLINE), FormatStyle::Bullets);
    }

    #[test]
    fn test_exclusive_section() {
        let schema = schema();
        let policy = schema.section_policy("book", "private");
        assert!(!policy.sync);
        assert!(policy.is_exclusive_to(PERSONAL));
        assert!(!policy.is_exclusive_to(OUTLINE));
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let schema = schema();
        let policy = schema.section_policy("book", "odd");
        assert!(policy.sync);
        assert_eq!(policy.declared_format(OUTLINE), None);
        assert_eq!(policy.format_for(OUTLINE), FormatStyle::Bullets);
    }

    #[test]
    fn test_unlisted_section_is_synced() {
        let schema = NoteSchema::default();
        assert_eq!(
            *schema.section_policy("note", "anything"),
            SectionPolicy::default()
        );
    }

    #[test]
    fn test_unlisted_type_falls_back_to_note() {
        let schema = NoteSchema::default();
        let fallback = schema.note_type("recipe").unwrap();
        assert!(fallback.sections.contains_key("overview"));
    }

    #[test]
    fn test_default_schema_json_shape() {
        let json = serde_json::to_value(NoteSchema::default()).unwrap();
        assert_eq!(json["schema_version"], "1.0");
        assert_eq!(json["note_types"]["note"]["sections"]["notes"]["sync"], true);
    }
}
