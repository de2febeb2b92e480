//! Vault configuration
//!
//! [`SyncConfig`] is the directory and key table every sync consults. It is
//! built once per process, either from the built-in defaults or from an
//! optional `notesync.toml` that overrides parts of them:
//!
//! ```toml
//! content_dir = "content/pages"
//!
//! [personal]
//! target_dir = "vault"
//!
//! [personal.folders]
//! recipe = "Recipes"
//! ```

use std::collections::BTreeMap;

use notesync_fs::{ConfigStore, NormalizedPath, VaultPath};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::{Location, Platform};

/// Folder key used when neither type nor tags select a category folder.
pub const DEFAULT_FOLDER_KEY: &str = "default";

/// Layout and metadata requirements of one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Metadata keys every note on this platform must carry
    pub required_keys: Vec<String>,
    /// Directory holding the platform's notes, relative to the vault root
    pub target_dir: String,
    /// Category folders keyed by lowercase note type or tag
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub folders: BTreeMap<String, String>,
    /// Directory for interactive notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_dir: Option<String>,
}

impl PlatformConfig {
    fn new(required_keys: &[&str], target_dir: &str) -> Self {
        Self {
            required_keys: required_keys.iter().map(|k| k.to_string()).collect(),
            target_dir: target_dir.to_string(),
            folders: BTreeMap::new(),
            visualization_dir: None,
        }
    }

    fn apply(&mut self, overrides: PlatformOverride) {
        if let Some(keys) = overrides.required_keys {
            self.required_keys = keys;
        }
        if let Some(dir) = overrides.target_dir {
            self.target_dir = dir;
        }
        if let Some(folders) = overrides.folders {
            self.folders.extend(folders);
        }
        if let Some(dir) = overrides.visualization_dir {
            self.visualization_dir = Some(dir);
        }
    }
}

/// Immutable configuration shared by every sync in a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub content_dir: String,
    pub schema_file: String,
    pub outline: PlatformConfig,
    pub personal: PlatformConfig,
    pub publish: PlatformConfig,
    /// Directory names never descended into during discovery
    pub skip_dirs: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let mut personal = PlatformConfig::new(&["title", "tags", "created"], "obsidian");
        personal.folders = [
            ("person", "People"),
            ("book", "Books"),
            ("article", "Articles"),
            ("place", "Places"),
            ("organization", "Organizations"),
            (DEFAULT_FOLDER_KEY, "Notes"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut publish =
            PlatformConfig::new(&["title", "format", "date", "categories"], "quarto/posts");
        publish.visualization_dir = Some("quarto/visualizations".to_string());

        Self {
            content_dir: VaultPath::ContentDir.to_string(),
            schema_file: VaultPath::SchemaFile.to_string(),
            outline: PlatformConfig::new(&["title", "type"], "logseq/pages"),
            personal,
            publish,
            skip_dirs: [".obsidian", "_site", ".quarto"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

/// Partial platform table as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlatformOverride {
    required_keys: Option<Vec<String>>,
    target_dir: Option<String>,
    folders: Option<BTreeMap<String, String>>,
    visualization_dir: Option<String>,
}

/// On-disk config file; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    content_dir: Option<String>,
    schema_file: Option<String>,
    skip_dirs: Option<Vec<String>>,
    #[serde(alias = "logseq")]
    outline: Option<PlatformOverride>,
    #[serde(alias = "obsidian")]
    personal: Option<PlatformOverride>,
    #[serde(alias = "quarto")]
    publish: Option<PlatformOverride>,
}

impl SyncConfig {
    /// Load a config file and apply it over the defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_native(),
            });
        }
        let file: ConfigFile = ConfigStore::new().load(path)?;
        Ok(Self::default().with_overrides(file))
    }

    /// Resolve the configuration for a vault.
    ///
    /// An explicit path must exist. Otherwise `notesync.toml` at the vault
    /// root is used when present, and the defaults when not.
    pub fn discover(root: &NormalizedPath, explicit: Option<&NormalizedPath>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = root.join(VaultPath::ConfigFile.as_str());
        if path.is_file() {
            tracing::debug!(path = %path, "loading vault config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn with_overrides(mut self, file: ConfigFile) -> Self {
        if let Some(dir) = file.content_dir {
            self.content_dir = dir;
        }
        if let Some(schema) = file.schema_file {
            self.schema_file = schema;
        }
        if let Some(dirs) = file.skip_dirs {
            self.skip_dirs = dirs;
        }
        if let Some(o) = file.outline {
            self.outline.apply(o);
        }
        if let Some(o) = file.personal {
            self.personal.apply(o);
        }
        if let Some(o) = file.publish {
            self.publish.apply(o);
        }
        self
    }

    pub fn platform(&self, platform: Platform) -> &PlatformConfig {
        match platform {
            Platform::Outline => &self.outline,
            Platform::Personal => &self.personal,
            Platform::Publish => &self.publish,
        }
    }

    /// Required metadata keys at a location. The content tree has none.
    pub fn required_keys(&self, location: Location) -> &[String] {
        match location {
            Location::Content => &[],
            Location::Platform(p) => &self.platform(p).required_keys,
        }
    }

    /// Directory holding notes at a location, relative to the vault root.
    pub fn dir(&self, location: Location) -> &str {
        match location {
            Location::Content => &self.content_dir,
            Location::Platform(p) => &self.platform(p).target_dir,
        }
    }

    /// Directory for interactive publish notes, falling back to the posts dir.
    pub fn visualization_dir(&self) -> &str {
        self.publish
            .visualization_dir
            .as_deref()
            .unwrap_or(&self.publish.target_dir)
    }

    /// Every directory a location reads notes from.
    pub fn source_dirs(&self, location: Location) -> Vec<&str> {
        match location {
            Location::Platform(Platform::Publish) => {
                let mut dirs = vec![self.publish.target_dir.as_str()];
                if let Some(viz) = self.publish.visualization_dir.as_deref() {
                    dirs.push(viz);
                }
                dirs
            }
            other => vec![self.dir(other)],
        }
    }

    /// Category folder for a lowercase key, if one is configured.
    pub fn folder(&self, key: &str) -> Option<&str> {
        self.personal.folders.get(key).map(String::as_str)
    }

    /// Category folder used when nothing else matches.
    pub fn default_folder(&self) -> &str {
        self.folder(DEFAULT_FOLDER_KEY).unwrap_or("")
    }

    /// Whether a path passes through a skipped directory.
    pub fn is_skipped(&self, path: &NormalizedPath) -> bool {
        self.skip_dirs.iter().any(|dir| path.has_component(dir))
    }
}
