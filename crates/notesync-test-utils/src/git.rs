//! Git repository fixtures for change-scoped syncs.

use std::path::Path;

/// Initialises a real git repository using `git2`, with no commits.
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

fn fail<T>(step: &str, e: git2::Error) -> T {
    panic!("commit_all: {step} failed: {e}")
}

/// Stages every file and commits it on top of HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap_or_else(|e| fail("index", e));
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap_or_else(|e| fail("add_all", e));
    index.write().unwrap_or_else(|e| fail("index write", e));
    let tree_id = index.write_tree().unwrap_or_else(|e| fail("write_tree", e));
    let tree = repo.find_tree(tree_id).unwrap_or_else(|e| fail("find_tree", e));

    let sig = git2::Signature::now("Test User", "test@example.com")
        .unwrap_or_else(|e| fail("signature", e));
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| fail("commit", e))
}
