//! Outline-style `key:: value` properties
//!
//! Properties occupy the leading lines of a note, one pair per line, and
//! are separated from the body by a blank line. Values are plain strings;
//! there is no quoting and no multi-line form.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::document::Metadata;
use crate::error::Result;
use crate::format::{MetadataEncoding, MetadataHandler};

static PROPERTY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_-]+)::(?:\s+(.*))?$").unwrap());

/// Handler for outline property blocks
#[derive(Debug, Default)]
pub struct PropertiesHandler;

impl PropertiesHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Render a metadata value on a single property line.
///
/// Sequences are comma-joined so that `tags:: a, b` round-trips through
/// the comma splitting applied to tag strings.
pub fn render_property_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.replace('\n', " "),
        Value::Sequence(items) => items
            .iter()
            .map(render_property_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => render_property_value(&tagged.value),
    }
}

impl MetadataHandler for PropertiesHandler {
    fn encoding(&self) -> MetadataEncoding {
        MetadataEncoding::Properties
    }

    fn split(&self, source: &str) -> Result<(Metadata, String)> {
        let mut metadata = Metadata::new();
        let mut consumed = 0;

        for line in source.split_inclusive('\n') {
            let Some(caps) = PROPERTY_LINE.captures(line.trim_end_matches(['\r', '\n'])) else {
                break;
            };
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            metadata.insert(caps[1].to_string(), Value::String(value.to_string()));
            consumed += line.len();
        }

        Ok((metadata, source[consumed..].trim().to_string()))
    }

    fn render(&self, metadata: &Metadata, body: &str) -> String {
        let mut out = String::new();
        for (key, value) in metadata {
            out.push_str(&format!("{}:: {}\n", key, render_property_value(value)));
        }
        if !metadata.is_empty() {
            out.push('\n');
        }
        out.push_str(body.trim());
        out.push('\n');
        out
    }
}
