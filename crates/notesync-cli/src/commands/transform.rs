//! Transform command implementation

use std::path::Path;

use colored::Colorize;

use notesync_fs::NormalizedPath;
use notesync_meta::Platform;

use super::Vault;
use crate::error::Result;

/// Run the transform command
pub fn run_transform(
    vault: &Vault,
    file: &Path,
    from: Platform,
    to: Platform,
    output: Option<&Path>,
) -> Result<()> {
    let engine = vault.engine()?;
    let output = output.map(NormalizedPath::new);
    let today = chrono::Local::now().date_naive();

    let written = engine.transform_file(
        &NormalizedPath::new(file),
        from,
        to,
        output.as_ref(),
        today,
    )?;

    println!(
        "{} Transformed {} -> {}: {}",
        "OK".green().bold(),
        from,
        to,
        written.to_string().cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_transform_in_place() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("dune.md");
        fs::write(&note, "title:: Dune\ntype:: book\n\n- spice\n").unwrap();
        let vault = Vault {
            root: dir.path().to_path_buf(),
            config: None,
        };

        run_transform(&vault, &note, Platform::Outline, Platform::Publish, None).unwrap();

        let content = fs::read_to_string(&note).unwrap();
        assert!(content.starts_with("---\n"));
        assert!(content.contains("format: html"));
        assert!(content.ends_with("- spice\n"));
    }

    #[test]
    fn test_transform_same_platform_fails() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("dune.md");
        fs::write(&note, "title:: Dune\n").unwrap();
        let vault = Vault {
            root: dir.path().to_path_buf(),
            config: None,
        };

        let result = run_transform(&vault, &note, Platform::Outline, Platform::Outline, None);
        assert!(matches!(result, Err(CliError::Core(_))));
    }
}
