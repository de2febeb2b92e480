//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Layout decisions (which platform directory a note lives in, which
/// category folder it belongs to) are made on the normalized string and
/// converted to a platform-native path only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// Empty segments are ignored so that an empty category folder does
    /// not introduce a doubled separator.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let segment_normalized = segment_normalized.trim_start_matches("./");
        if segment_normalized.is_empty() {
            return self.clone();
        }
        if self.inner.is_empty() || self.inner == "." {
            return Self {
                inner: segment_normalized.to_string(),
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the file name without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Replace (or add) the extension of the final component.
    pub fn with_extension(&self, extension: &str) -> Self {
        let Some(stem) = self.file_stem() else {
            return self.clone();
        };
        let file_name = if extension.is_empty() {
            stem.to_string()
        } else {
            format!("{}.{}", stem, extension)
        };
        match self.parent() {
            Some(parent) => parent.join(&file_name),
            None => Self { inner: file_name },
        }
    }

    /// Path of `self` relative to `base`, if `self` lives under `base`.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<Self> {
        let base = base.inner.trim_end_matches('/');
        if base.is_empty() || base == "." {
            return Some(self.clone());
        }
        let rest = self.inner.strip_prefix(base)?;
        let rest = rest.strip_prefix('/')?;
        Some(Self {
            inner: rest.to_string(),
        })
    }

    /// Whether this path names `dir` or a location beneath it.
    ///
    /// Matches on whole components: `vault/quarto/posts` and
    /// `vault/quarto/posts/2024` both match `quarto/posts`, while
    /// `vault/myquarto/posts` does not.
    pub fn is_within_dir(&self, dir: &str) -> bool {
        let dir = dir.replace('\\', "/");
        let dir = dir.trim_matches('/');
        if dir.is_empty() {
            return false;
        }
        let path = self.inner.trim_end_matches('/');
        path == dir
            || path.ends_with(&format!("/{}", dir))
            || path.starts_with(&format!("{}/", dir))
            || path.contains(&format!("/{}/", dir))
    }

    /// Whether any component of this path equals `name`.
    pub fn has_component(&self, name: &str) -> bool {
        self.inner.split('/').any(|c| c == name)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
