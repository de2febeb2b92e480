//! Well-known vault-relative paths.

use std::path::Path;

/// Fixed files and directories inside a notes vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultPath {
    /// The note schema consulted for per-section sync policy
    SchemaFile,
    /// Optional configuration overriding the default directory table
    ConfigFile,
    /// Canonical content tree
    ContentDir,
}

impl VaultPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaFile => "unified_note_schema.json",
            Self::ConfigFile => "notesync.toml",
            Self::ContentDir => "content/pages",
        }
    }
}

impl AsRef<Path> for VaultPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for VaultPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for VaultPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
