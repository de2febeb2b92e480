use notesync_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_text_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("obsidian/Books/dune.md"));

    io::write_text(&path, "---\ntitle: Dune\n---\n\nSpice.").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "---\ntitle: Dune\n---\n\nSpice.");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("note.md");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_failed_write_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    // A non-empty directory where the note should go makes the final rename fail
    let blocked = temp.path().join("note.md");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("keep.md"), "x").unwrap();

    let result = io::write_atomic(&NormalizedPath::new(&blocked), b"content");

    assert!(result.is_err());
    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["note.md".to_string()]);
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("note.md"));

    io::write_atomic(&path, b"content").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["note.md".to_string()]);
}

#[test]
fn test_read_text_missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.md"));

    let err = io::read_text(&path).unwrap_err();
    assert!(err.to_string().contains("missing.md"));
}

#[test]
fn test_ensure_dir_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("quarto/visualizations"));

    io::ensure_dir(&path).unwrap();
    io::ensure_dir(&path).unwrap();
    assert!(path.is_dir());
}
