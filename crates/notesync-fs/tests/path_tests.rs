use notesync_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("obsidian\\Books\\dune.md");
    assert_eq!(path.as_str(), "obsidian/Books/dune.md");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("obsidian");
    assert_eq!(base.join("Books").join("dune.md").as_str(), "obsidian/Books/dune.md");
}

#[test]
fn test_join_empty_segment_is_noop() {
    let base = NormalizedPath::new("quarto/posts");
    assert_eq!(base.join("").as_str(), "quarto/posts");
}

#[test]
fn test_join_onto_empty_base() {
    let base = NormalizedPath::new("");
    assert_eq!(base.join("logseq/pages").as_str(), "logseq/pages");
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("quarto/posts/foo.qmd");
    assert_eq!(path.parent().unwrap().as_str(), "quarto/posts");
}

#[rstest]
#[case("quarto/posts/foo.qmd", Some("foo.qmd"), Some("foo"), Some("qmd"))]
#[case("content/pages/my-note.md", Some("my-note.md"), Some("my-note"), Some("md"))]
#[case("README", Some("README"), Some("README"), None)]
#[case("obsidian/.hidden", Some(".hidden"), Some(".hidden"), None)]
fn test_file_components(
    #[case] input: &str,
    #[case] name: Option<&str>,
    #[case] stem: Option<&str>,
    #[case] ext: Option<&str>,
) {
    let path = NormalizedPath::new(input);
    assert_eq!(path.file_name(), name);
    assert_eq!(path.file_stem(), stem);
    assert_eq!(path.extension(), ext);
}

#[test]
fn test_with_extension_rewrites_last_component() {
    let path = NormalizedPath::new("quarto/posts/foo.qmd");
    assert_eq!(path.with_extension("md").as_str(), "quarto/posts/foo.md");

    let bare = NormalizedPath::new("foo.md");
    assert_eq!(bare.with_extension("qmd").as_str(), "foo.qmd");
}

#[test]
fn test_strip_prefix() {
    let path = NormalizedPath::new("content/pages/books/dune.md");
    let base = NormalizedPath::new("content/pages/");
    assert_eq!(path.strip_prefix(&base).unwrap().as_str(), "books/dune.md");

    let other = NormalizedPath::new("obsidian");
    assert!(path.strip_prefix(&other).is_none());
}

#[rstest]
#[case("quarto/posts", "quarto/posts", true)]
#[case("/vault/quarto/posts", "quarto/posts", true)]
#[case("/vault/quarto/posts/2024/a.qmd", "quarto/posts", true)]
#[case("/vault/myquarto/posts", "quarto/posts", false)]
#[case("/vault/obsidian", "obsidian", true)]
#[case("/vault/obsidian-archive", "obsidian", false)]
#[case("/vault/content/pages", "", false)]
fn test_is_within_dir(#[case] path: &str, #[case] dir: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(path).is_within_dir(dir), expected);
}

#[test]
fn test_has_component() {
    let path = NormalizedPath::new("quarto/_site/posts/a.md");
    assert!(path.has_component("_site"));
    assert!(!path.has_component("site"));
}
