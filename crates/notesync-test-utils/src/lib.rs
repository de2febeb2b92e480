//! Shared test utilities for the notesync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`vault`]: [`TestVault`] builder for notes vault scenarios
//! - [`git`]: git repositories over a vault

pub mod git;
pub mod vault;

pub use git::{commit_all, real_git_repo};
pub use vault::TestVault;
