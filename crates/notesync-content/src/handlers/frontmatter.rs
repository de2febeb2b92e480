//! Fenced YAML frontmatter
//!
//! ```markdown
//! ---
//! title: Dune
//! tags:
//!   - book
//! ---
//!
//! Body text.
//! ```

use serde_yaml::Value;

use crate::document::Metadata;
use crate::error::{Error, Result};
use crate::format::{MetadataEncoding, MetadataHandler};

const FENCE: &str = "---";

/// Handler for `---` fenced YAML metadata
#[derive(Debug, Default)]
pub struct FrontmatterHandler;

impl FrontmatterHandler {
    pub fn new() -> Self {
        Self
    }

    /// Locate the YAML block and the body that follows it.
    fn locate(source: &str) -> Option<(&str, &str)> {
        let mut lines = source.split_inclusive('\n');
        let opening = lines.next()?;
        if opening.trim_end() != FENCE {
            return None;
        }

        let yaml_start = opening.len();
        let mut offset = yaml_start;
        for line in lines {
            if line.trim_end() == FENCE {
                return Some((&source[yaml_start..offset], &source[offset + line.len()..]));
            }
            offset += line.len();
        }
        None
    }

    fn key_to_string(key: &Value) -> Result<String> {
        match key {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(Error::parse(
                "yaml",
                format!("unsupported frontmatter key: {:?}", other),
            )),
        }
    }
}

impl MetadataHandler for FrontmatterHandler {
    fn encoding(&self) -> MetadataEncoding {
        MetadataEncoding::Frontmatter
    }

    fn split(&self, source: &str) -> Result<(Metadata, String)> {
        let Some((yaml, body)) = Self::locate(source) else {
            return Ok((Metadata::new(), source.trim().to_string()));
        };

        let metadata = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Metadata::new(),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(k, v)| Ok((Self::key_to_string(&k)?, v)))
                .collect::<Result<Metadata>>()?,
            other => {
                return Err(Error::parse(
                    "yaml",
                    format!("frontmatter is not a mapping: {:?}", other),
                ));
            }
        };

        Ok((metadata, body.trim().to_string()))
    }

    fn render(&self, metadata: &Metadata, body: &str) -> String {
        let yaml = if metadata.is_empty() {
            "{}\n".to_string()
        } else {
            serde_yaml::to_string(metadata).unwrap_or_default()
        };
        format!("{FENCE}\n{yaml}{FENCE}\n\n{}\n", body.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_frontmatter() {
        let source = "---\ntitle: Dune\ntags:\n  - book\n---\n\nSpice.\n";
        let (meta, body) = FrontmatterHandler::new().split(source).unwrap();
        assert_eq!(meta["title"], Value::String("Dune".into()));
        assert_eq!(
            meta["tags"],
            Value::Sequence(vec![Value::String("book".into())])
        );
        assert_eq!(body, "Spice.");
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (meta, body) = FrontmatterHandler::new().split("---\n---\nBody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_frontmatter_is_body() {
        let (meta, body) = FrontmatterHandler::new().split("---\ntitle: x\nBody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "---\ntitle: x\nBody");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let result = FrontmatterHandler::new().split("---\ntitle: [unclosed\n---\nBody");
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_frontmatter_is_error() {
        let result = FrontmatterHandler::new().split("---\njust text\n---\nBody");
        assert!(matches!(result, Err(Error::ParseError { .. })));
    }

    #[test]
    fn test_render_sorted_keys() {
        let mut meta = Metadata::new();
        meta.insert("title".into(), Value::String("Dune".into()));
        meta.insert("format".into(), Value::String("html".into()));
        let out = FrontmatterHandler::new().render(&meta, "Spice.");
        assert_eq!(out, "---\nformat: html\ntitle: Dune\n---\n\nSpice.\n");
    }
}
