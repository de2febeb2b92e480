//! Filesystem abstraction for notesync
//!
//! Provides normalized path handling, atomic text I/O, content checksums
//! and a format-detecting configuration store.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::VaultPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
