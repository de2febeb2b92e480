//! Metadata and configuration management for notesync.
//!
//! This crate provides the platform model, the vault configuration, the
//! note schema consulted for per-section policy, and the metadata
//! transform table used when converting a single note between platforms.

pub mod config;
pub mod error;
pub mod loader;
pub mod platform;
pub mod schema;
pub mod transform;

pub use config::{PlatformConfig, SyncConfig};
pub use error::{Error, Result};
pub use loader::SchemaLoader;
pub use platform::{Location, Platform};
pub use schema::{NoteSchema, NoteTypeSchema, SectionPolicy};
pub use transform::{TransformContext, transform};
