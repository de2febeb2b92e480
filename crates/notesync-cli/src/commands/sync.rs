//! Sync command implementation

use colored::Colorize;

use notesync_core::{SyncOptions, SyncReport, Target};
use notesync_meta::Location;

use super::Vault;
use crate::error::{CliError, Result};

fn print_report(report: &SyncReport) {
    for outcome in &report.files {
        let marker = if outcome.created { "+".green() } else { "~".yellow() };
        println!(
            "   {} {} -> {}",
            marker,
            outcome.source.dimmed(),
            outcome.target.cyan()
        );
        if outcome.back_synced {
            println!(
                "   {} {} -> {}",
                "<".blue(),
                outcome.target.dimmed(),
                outcome.source.cyan()
            );
        }
    }
}

/// Run the sync command
///
/// Syncs every note of `source`, or only `file` when given.
pub fn run_sync(
    vault: &Vault,
    source: Location,
    target: Target,
    file: Option<&str>,
    options: SyncOptions,
    json: bool,
) -> Result<()> {
    let engine = vault.engine()?;

    if !json {
        println!(
            "{} Synchronizing {} -> {}...",
            "=>".blue().bold(),
            source,
            target
        );
    }

    let report = match file {
        Some(name) => engine.sync_named(source, target, name, &options)?,
        None => engine.sync_all(source, target, &options)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return if report.success {
            Ok(())
        } else {
            Err(CliError::user("Synchronization failed"))
        };
    }

    if report.success {
        if report.files.is_empty() {
            println!("{} No notes found in {}.", "OK".green().bold(), source);
        } else {
            println!(
                "{} Synchronized {} note(s):",
                "OK".green().bold(),
                report.files.len()
            );
            print_report(&report);
        }
        Ok(())
    } else {
        print_report(&report);
        println!("{} Synchronization failed:", "ERROR".red().bold());
        for error in &report.errors {
            println!("   {} {}", "!".red(), error);
        }
        Err(CliError::user("Synchronization failed"))
    }
}
