//! Loader for the note schema file
//!
//! The schema is optional. A missing or unreadable schema file is not an
//! error: the loader warns and falls back to [`NoteSchema::default`].

use notesync_fs::{ConfigStore, NormalizedPath, io};

use crate::Result;
use crate::schema::NoteSchema;

/// Loads the note schema from the vault.
#[derive(Debug, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load the schema, falling back to the default on any failure.
    pub fn load(&self, path: &NormalizedPath) -> NoteSchema {
        if !path.is_file() {
            tracing::warn!(path = %path, "schema file not found, using default schema");
            return NoteSchema::default();
        }

        let parsed = io::read_text(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<NoteSchema>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(schema) => {
                tracing::debug!(
                    path = %path,
                    types = schema.note_types.len(),
                    "loaded note schema"
                );
                schema
            }
            Err(e) => {
                tracing::warn!(path = %path, "invalid schema file, using default schema: {}", e);
                NoteSchema::default()
            }
        }
    }

    /// Write the default schema unless a schema file already exists.
    ///
    /// Returns whether a file was written.
    pub fn write_default(&self, path: &NormalizedPath) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        ConfigStore::new().save(path, &NoteSchema::default())?;
        Ok(true)
    }
}
