//! notesync CLI
//!
//! The command-line interface for syncing notes across a vault.

mod cli;
mod commands;
mod error;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use notesync_core::{ChangeScope, SyncOptions};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::Vault;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = result {
        eprintln!("{}: failed to set tracing subscriber: {}", "warning".yellow(), e);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} note sync", "notesync".green().bold());
        println!();
        println!("Run {} for available commands.", "notesync --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let vault = Vault {
        root: cli.root.map(|r| cwd.join(r)).unwrap_or_else(|| cwd.clone()),
        config: cli.config.map(|c| cwd.join(c)),
    };

    execute_command(&vault, &cwd, command)
}

fn execute_command(vault: &Vault, cwd: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            source,
            target,
            file,
            bidirectional,
            modified_only,
            since_commit,
            json,
        } => {
            let changes = match since_commit {
                Some(rev) => Some(ChangeScope::Since(rev)),
                None if modified_only => Some(ChangeScope::WorkingTree),
                None => None,
            };
            commands::run_sync(
                vault,
                source,
                target,
                file.as_deref(),
                SyncOptions {
                    bidirectional,
                    changes,
                    ..SyncOptions::default()
                },
                json,
            )
        }
        Commands::Init => commands::run_init(vault),
        Commands::Transform {
            file,
            from,
            to,
            output,
        } => {
            let output: Option<PathBuf> = output.map(|o| cwd.join(o));
            commands::run_transform(vault, &cwd.join(file), from, to, output.as_deref())
        }
        Commands::Plan {
            source,
            target,
            file,
            json,
        } => commands::run_plan(vault, source, target, &file, json),
    }
}
