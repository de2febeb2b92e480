//! Init command implementation

use colored::Colorize;

use super::Vault;
use crate::error::Result;

/// Run the init command
///
/// Creates the vault directories and the default schema; safe to repeat.
pub fn run_init(vault: &Vault) -> Result<()> {
    println!("{} Initializing vault...", "=>".blue().bold());

    let report = vault.engine()?.init()?;

    if report.actions.is_empty() {
        println!("{} Vault already initialized.", "OK".green().bold());
    } else {
        println!("{} Vault initialized:", "OK".green().bold());
        for action in &report.actions {
            println!("   {} {}", "+".green(), action);
        }
    }

    Ok(())
}
