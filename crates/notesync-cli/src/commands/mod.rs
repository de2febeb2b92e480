//! Command implementations for notesync-cli

pub mod init;
pub mod plan;
pub mod sync;
pub mod transform;

use std::path::PathBuf;

use notesync_core::SyncEngine;
use notesync_fs::NormalizedPath;

use crate::error::Result;

pub use init::run_init;
pub use plan::run_plan;
pub use sync::run_sync;
pub use transform::run_transform;

/// Where the vault lives and which config file to use.
#[derive(Debug, Clone)]
pub struct Vault {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

impl Vault {
    /// Open the sync engine for this vault.
    pub fn engine(&self) -> Result<SyncEngine> {
        let config = self.config.as_ref().map(NormalizedPath::new);
        Ok(SyncEngine::open(
            NormalizedPath::new(&self.root),
            config.as_ref(),
        )?)
    }
}
