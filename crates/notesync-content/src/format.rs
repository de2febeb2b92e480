//! Metadata encodings and the handler trait

use serde::{Deserialize, Serialize};

use crate::document::Metadata;
use crate::error::Result;
use crate::handlers::{FrontmatterHandler, PropertiesHandler};

/// How a note stores its metadata on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataEncoding {
    /// Leading `key:: value` lines followed by a blank line
    Properties,
    /// A `---` fenced YAML mapping
    Frontmatter,
}

impl MetadataEncoding {
    /// Detect the encoding of a note from its content.
    ///
    /// Anything that does not open with a `---` fence is read as properties;
    /// a note without properties is simply a body.
    pub fn detect(content: &str) -> Self {
        if content.starts_with("---") {
            Self::Frontmatter
        } else {
            Self::Properties
        }
    }

    /// Get the handler for this encoding.
    pub fn handler(&self) -> Box<dyn MetadataHandler> {
        match self {
            Self::Properties => Box::new(PropertiesHandler::new()),
            Self::Frontmatter => Box::new(FrontmatterHandler::new()),
        }
    }
}

/// Reads and writes the metadata block of a note.
pub trait MetadataHandler: Send + Sync {
    /// The encoding this handler implements.
    fn encoding(&self) -> MetadataEncoding;

    /// Split a document into its metadata and body.
    ///
    /// The returned body is trimmed.
    fn split(&self, source: &str) -> Result<(Metadata, String)>;

    /// Render metadata and body into a document.
    fn render(&self, metadata: &Metadata, body: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            MetadataEncoding::detect("---\ntitle: x\n---\n"),
            MetadataEncoding::Frontmatter
        );
        assert_eq!(
            MetadataEncoding::detect("title:: x\n\n- a"),
            MetadataEncoding::Properties
        );
        assert_eq!(MetadataEncoding::detect("- a"), MetadataEncoding::Properties);
    }

    #[test]
    fn test_handler_matches_encoding() {
        for encoding in [MetadataEncoding::Properties, MetadataEncoding::Frontmatter] {
            assert_eq!(encoding.handler().encoding(), encoding);
        }
    }
}
