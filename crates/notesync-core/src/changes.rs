//! Notes changed according to git
//!
//! Batch syncs can be limited to notes git reports as modified, either in
//! the working tree or since a given revision.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use git2::{Delta, Diff, Repository};
use notesync_fs::NormalizedPath;

use crate::Result;

const NOTE_EXTENSIONS: [&str; 2] = ["md", "qmd"];

/// Which changes count as modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeScope {
    /// Unstaged working tree changes, like `git diff`
    WorkingTree,
    /// Working tree and index against a revision, like `git diff <rev>`
    Since(String),
}

impl fmt::Display for ChangeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingTree => write!(f, "working tree"),
            Self::Since(rev) => write!(f, "since {}", rev),
        }
    }
}

/// Vault-relative paths of modified notes.
///
/// The repository is discovered from `root` upwards, so the vault may be a
/// subdirectory of the repository. Deleted notes are not listed.
pub fn modified_notes(root: &NormalizedPath, scope: &ChangeScope) -> Result<BTreeSet<String>> {
    let repo = Repository::discover(root.to_native())?;
    let diff = match scope {
        ChangeScope::WorkingTree => repo.diff_index_to_workdir(None, None)?,
        ChangeScope::Since(rev) => {
            let tree = repo.revparse_single(rev)?.peel_to_tree()?;
            repo.diff_tree_to_workdir_with_index(Some(&tree), None)?
        }
    };

    let Some(workdir) = repo.workdir() else {
        return Err(git2::Error::from_str("repository has no working directory").into());
    };
    let notes = vault_paths(&diff, workdir, &root.to_native());
    tracing::debug!(%scope, count = notes.len(), "modified notes");
    Ok(notes)
}

/// Map note paths in a diff from the repository to the vault root.
fn vault_paths(diff: &Diff<'_>, workdir: &Path, root: &Path) -> BTreeSet<String> {
    let workdir = fs::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf());
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

    diff.deltas()
        .filter(|delta| delta.status() != Delta::Deleted)
        .filter_map(|delta| delta.new_file().path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| NOTE_EXTENSIONS.contains(&ext))
        })
        .filter_map(|path| {
            let abs = workdir.join(path);
            abs.strip_prefix(&root)
                .ok()
                .map(|rel| NormalizedPath::new(rel).as_str().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(ChangeScope::WorkingTree.to_string(), "working tree");
        assert_eq!(ChangeScope::Since("HEAD~1".into()).to_string(), "since HEAD~1");
    }
}
