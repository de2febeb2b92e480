//! Plan command implementation

use colored::{ColoredString, Colorize};

use notesync_core::SyncDirection;
use notesync_meta::Location;

use super::Vault;
use crate::error::Result;

fn colored_direction(direction: SyncDirection) -> ColoredString {
    let label = direction.as_str();
    match direction {
        SyncDirection::None => label.dimmed(),
        SyncDirection::SourceToTarget => label.green(),
        SyncDirection::TargetToSource => label.blue(),
        SyncDirection::SourceOnly | SyncDirection::TargetOnly => label.yellow(),
        SyncDirection::Ignore => label.dimmed(),
    }
}

/// Run the plan command
///
/// Prints what a sync of one note would do to each section.
pub fn run_plan(
    vault: &Vault,
    source: Location,
    target: Location,
    file: &str,
    json: bool,
) -> Result<()> {
    let engine = vault.engine()?;
    let path = engine.locate_file(source, file)?;
    let outcome = engine.plan(&path, source, target)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let state = if outcome.created { "new" } else { "existing" };
    println!(
        "{} {} -> {} ({})",
        "=>".blue().bold(),
        outcome.source,
        outcome.target.cyan(),
        state.dimmed()
    );
    for section in &outcome.sections {
        match section.similarity {
            Some(similarity) => println!(
                "   {:<20} {} {}",
                section.name,
                colored_direction(section.direction),
                format!("[{:?}]", similarity).to_lowercase().dimmed()
            ),
            None => println!(
                "   {:<20} {}",
                section.name,
                colored_direction(section.direction)
            ),
        }
    }

    Ok(())
}
