//! The Note document: metadata plus body

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::error::Result;
use crate::format::MetadataEncoding;
use crate::section::{Sections, extract_sections};

/// Note metadata. Keys are unique; rendering orders them alphabetically.
pub type Metadata = BTreeMap<String, Value>;

/// Note type assumed when metadata carries no `type`.
pub const DEFAULT_NOTE_TYPE: &str = "note";

/// One logical note, independent of its on-disk encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub metadata: Metadata,
    pub body: String,
}

impl Note {
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    /// Parse a note, detecting its metadata encoding from the content.
    pub fn parse(content: &str) -> Result<Self> {
        let handler = MetadataEncoding::detect(content).handler();
        let (metadata, body) = handler.split(content)?;
        Ok(Self { metadata, body })
    }

    /// Render the note with the given metadata encoding.
    pub fn render(&self, encoding: MetadataEncoding) -> String {
        encoding.handler().render(&self.metadata, &self.body)
    }

    /// Split the body into named sections.
    pub fn sections(&self) -> Sections {
        extract_sections(&self.body)
    }

    /// The lowercased `type` metadata value, or `note`.
    pub fn note_type(&self) -> String {
        match self.metadata.get("type") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => DEFAULT_NOTE_TYPE.to_string(),
        }
    }
}
