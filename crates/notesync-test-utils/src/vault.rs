//! [`TestVault`] builder for notesync test scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary notes vault with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use notesync_test_utils::TestVault;
///
/// let vault = TestVault::new();
/// vault.write_note("content/pages/dune.md", "---\ntitle: Dune\n---\n\n## Notes\n- spice\n");
/// vault.assert_file_exists("content/pages/dune.md");
/// ```
pub struct TestVault {
    temp_dir: TempDir,
}

impl Default for TestVault {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVault {
    /// Create an empty temporary vault.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the vault.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a note at `path` (relative to the vault root), creating parent
    /// directories.
    pub fn write_note(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("write_note: failed to create {}: {e}", parent.display()));
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("write_note: failed to write {}: {e}", full_path.display()));
    }

    /// Write the vault's `notesync.toml`.
    pub fn write_config(&self, content: &str) {
        self.write_note("notesync.toml", content);
    }

    /// Write the vault's note schema.
    pub fn write_schema(&self, json: &str) {
        self.write_note("unified_note_schema.json", json);
    }

    /// Read a file relative to the vault root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the vault root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the vault root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
