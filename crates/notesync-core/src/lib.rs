//! Sync orchestration for notesync
//!
//! This crate sits above the content and metadata layers and implements:
//!
//! - **changes**: list notes git reports as modified
//! - **direction**: decide, per section, which side of a note pair wins
//! - **merge**: build the merged section map, converting formats
//! - **frontmatter**: reconcile metadata against a platform's required keys
//! - **layout**: map a source note to its path on another platform
//! - **SyncEngine**: single-file and batch sync, section write-back, init,
//!   single-file transforms and dry planning
//!
//! # Architecture
//!
//! ```text
//!                 notesync-cli
//!                      |
//!                notesync-core
//!                      |
//!        +-------------+-------------+
//!        |             |             |
//!  notesync-fs  notesync-content  notesync-meta
//! ```

pub mod changes;
pub mod direction;
pub mod engine;
pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod merge;
pub mod report;

pub use changes::{ChangeScope, modified_notes};
pub use direction::{SectionPlan, SyncDirection, resolve_directions};
pub use engine::{SyncEngine, SyncOptions, Target};
pub use error::{Error, Result};
pub use frontmatter::{MetadataContext, merge_metadata};
pub use layout::{resolve_target_path, target_folder};
pub use merge::{SectionFormats, merge_sections};
pub use report::{FileOutcome, SyncReport};
