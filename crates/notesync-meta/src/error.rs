//! Error types for notesync-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] notesync_fs::Error),

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    #[error("Transformation from {from} to {to} not supported")]
    UnsupportedTransform { from: String, to: String },
}
