//! Error types for notesync-core

/// Result type for notesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested note does not exist
    #[error("File not found in {location}: {name}")]
    FileNotFound { location: String, name: String },

    /// Source and target of a sync are the same location
    #[error("Cannot sync {location} onto itself")]
    SameLocation { location: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from notesync-fs
    #[error(transparent)]
    Fs(#[from] notesync_fs::Error),

    /// Content error from notesync-content
    #[error(transparent)]
    Content(#[from] notesync_content::Error),

    /// Metadata error from notesync-meta
    #[error(transparent)]
    Meta(#[from] notesync_meta::Error),

    /// Git error while listing changed notes
    #[error(transparent)]
    Git(#[from] git2::Error),
}
