//! Platforms and sync locations
//!
//! A vault holds the same notes in three platform trees plus the canonical
//! content tree. Each location knows how its notes render sections and how
//! they store metadata.

use std::fmt;
use std::str::FromStr;

use notesync_content::{FormatStyle, MetadataEncoding, ReferenceStyle};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A target platform of the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Outline notes: nested bullets, `key:: value` properties
    #[serde(alias = "logseq")]
    Outline,
    /// Personal knowledge base: prose, YAML frontmatter, category folders
    #[serde(alias = "obsidian")]
    Personal,
    /// Publishing tree: prose, YAML frontmatter, posts and visualizations
    #[serde(alias = "quarto")]
    Publish,
}

impl Platform {
    /// Every platform, in sync order.
    pub const ALL: [Platform; 3] = [Platform::Outline, Platform::Personal, Platform::Publish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Personal => "personal",
            Self::Publish => "publish",
        }
    }

    /// Name of the application the platform tree was originally laid out for.
    ///
    /// Schema files key per-platform section options by either name.
    pub fn legacy_name(&self) -> &'static str {
        match self {
            Self::Outline => "logseq",
            Self::Personal => "obsidian",
            Self::Publish => "quarto",
        }
    }

    /// Section format used when the schema declares none.
    pub fn default_format(&self) -> FormatStyle {
        match self {
            Self::Outline => FormatStyle::Bullets,
            Self::Personal | Self::Publish => FormatStyle::Paragraphs,
        }
    }

    /// How notes on this platform store metadata.
    pub fn encoding(&self) -> MetadataEncoding {
        match self {
            Self::Outline => MetadataEncoding::Properties,
            Self::Personal | Self::Publish => MetadataEncoding::Frontmatter,
        }
    }

    /// How block references and embeds are written on this platform.
    pub fn reference_style(&self) -> ReferenceStyle {
        match self {
            Self::Outline => ReferenceStyle::Outline,
            Self::Personal => ReferenceStyle::Wiki,
            Self::Publish => ReferenceStyle::Web,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "outline" | "logseq" => Ok(Self::Outline),
            "personal" | "obsidian" => Ok(Self::Personal),
            "publish" | "quarto" => Ok(Self::Publish),
            _ => Err(Error::UnknownPlatform {
                name: s.to_string(),
            }),
        }
    }
}

/// A place notes are synced from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// The canonical content tree
    Content,
    Platform(Platform),
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Platform(p) => p.as_str(),
        }
    }

    /// The platform, if this is not the content tree.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::Content => None,
            Self::Platform(p) => Some(*p),
        }
    }

    /// Names under which schema sections carry options for this location.
    pub fn schema_keys(&self) -> Vec<&'static str> {
        match self {
            Self::Content => vec!["content"],
            Self::Platform(p) => vec![p.as_str(), p.legacy_name()],
        }
    }

    pub fn default_format(&self) -> FormatStyle {
        match self {
            Self::Content => FormatStyle::Bullets,
            Self::Platform(p) => p.default_format(),
        }
    }

    pub fn encoding(&self) -> MetadataEncoding {
        match self {
            Self::Content => MetadataEncoding::Frontmatter,
            Self::Platform(p) => p.encoding(),
        }
    }

    /// The content tree keeps outline references as written.
    pub fn reference_style(&self) -> ReferenceStyle {
        match self {
            Self::Content => ReferenceStyle::Outline,
            Self::Platform(p) => p.reference_style(),
        }
    }
}

impl From<Platform> for Location {
    fn from(platform: Platform) -> Self {
        Self::Platform(platform)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("content") {
            return Ok(Self::Content);
        }
        s.parse().map(Self::Platform)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
