//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use notesync_core::Target;
use notesync_meta::{Location, Platform};

/// notesync - Keep one set of notes in step across outline, personal and
/// publishing vaults
#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Vault root (defaults to the current directory)
    #[arg(long, global = true, env = "NOTESYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file overriding the default layout
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize notes from one location to others
    ///
    /// Examples:
    ///   notesync sync --target outline             # content -> outline
    ///   notesync sync --source obsidian --target all
    ///   notesync sync --target personal --file dune.md --bidirectional
    ///   notesync sync --target all --since-commit HEAD~3
    Sync {
        /// Location to read notes from
        #[arg(short, long, default_value = "content")]
        source: Location,

        /// Platform to write to, or `all`
        #[arg(short, long)]
        target: Target,

        /// Sync only this note (file name within the source trees)
        #[arg(short, long)]
        file: Option<String>,

        /// Write target-only sections back to the source
        #[arg(short, long)]
        bidirectional: bool,

        /// Sync only notes with uncommitted git changes
        #[arg(long, conflicts_with = "file")]
        modified_only: bool,

        /// Sync only notes changed since this git revision
        #[arg(long, value_name = "REV", conflicts_with = "file")]
        since_commit: Option<String>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the vault directories and the default note schema
    Init,

    /// Rewrite a note's metadata for another platform
    Transform {
        /// Note to transform
        file: PathBuf,

        /// Platform the note is written for
        #[arg(long)]
        from: Platform,

        /// Platform to convert to
        #[arg(long)]
        to: Platform,

        /// Write here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show per-section sync decisions for one note without writing
    Plan {
        /// Location to read the note from
        #[arg(short, long, default_value = "content")]
        source: Location,

        /// Location the note would be written to
        #[arg(short, long)]
        target: Location,

        /// File name of the note within the source trees
        #[arg(short, long)]
        file: String,

        /// Output the plan as JSON
        #[arg(long)]
        json: bool,
    },
}
