//! Error types for notesync-content

/// Result type for notesync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} metadata: {message}")]
    ParseError { format: String, message: String },

    #[error("Unknown section format: {0}")]
    UnknownFormat(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
