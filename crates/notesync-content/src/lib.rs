//! Note content handling for notesync
//!
//! Parses notes in either metadata encoding, splits bodies into named
//! sections, decides whether two section texts are the same, and converts
//! section text between bullet, paragraph and blockquote renderings.

pub mod convert;
pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod section;
pub mod similarity;

pub use convert::{FormatStyle, ReferenceStyle, convert, translate_references};
pub use document::{Metadata, Note};
pub use error::{Error, Result};
pub use format::{MetadataEncoding, MetadataHandler};
pub use section::{CONTENT_SECTION, Sections, extract_sections, reconstruct_content};
pub use similarity::{SIMILARITY_THRESHOLD, Similarity, classify, similarity_ratio};
