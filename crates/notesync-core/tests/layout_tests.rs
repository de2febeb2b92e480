//! Integration tests for target path layout

use notesync_content::Metadata;
use notesync_core::resolve_target_path;
use notesync_fs::NormalizedPath;
use notesync_meta::{Location, Platform, SyncConfig};
use rstest::rstest;

fn meta(yaml: &str) -> Metadata {
    if yaml.is_empty() {
        return Metadata::new();
    }
    serde_yaml::from_str(yaml).unwrap()
}

#[rstest]
// Publishing sources drop the interactive extension
#[case("quarto/posts/foo.qmd", "quarto/posts", Location::Platform(Platform::Outline), "", "logseq/pages/foo.md")]
#[case("quarto/visualizations/chart.qmd", "quarto/visualizations", Location::Content, "", "content/pages/chart.md")]
#[case("quarto/posts/foo.qmd", "quarto/posts", Location::Platform(Platform::Personal), "type: article", "obsidian/Articles/foo.md")]
// Personal sources are flattened
#[case("obsidian/Books/dune.md", "obsidian", Location::Platform(Platform::Outline), "", "logseq/pages/dune.md")]
#[case("obsidian/Books/dune.md", "obsidian", Location::Content, "", "content/pages/dune.md")]
#[case("obsidian/Notes/chart.md", "obsidian", Location::Platform(Platform::Publish), "interactive: true", "quarto/visualizations/chart.qmd")]
#[case("obsidian/Notes/post.md", "obsidian", Location::Platform(Platform::Publish), "", "quarto/posts/post.md")]
// Generic sources
#[case("content/pages/sub/dune.md", "content/pages", Location::Platform(Platform::Outline), "", "logseq/pages/sub/dune.md")]
#[case("content/pages/sub/dune.md", "content/pages", Location::Platform(Platform::Personal), "tags: [book]", "obsidian/Books/dune.md")]
#[case("content/pages/viz.md", "content/pages", Location::Platform(Platform::Publish), "tags: [visualization]", "quarto/visualizations/viz.qmd")]
#[case("content/pages/sub/dune.md", "content/pages", Location::Platform(Platform::Publish), "", "quarto/posts/dune.md")]
fn test_resolve_target_path(
    #[case] source: &str,
    #[case] source_dir: &str,
    #[case] target: Location,
    #[case] metadata: &str,
    #[case] expected: &str,
) {
    let config = SyncConfig::default();
    let path = resolve_target_path(
        &config,
        &NormalizedPath::new(source),
        source_dir,
        target,
        &meta(metadata),
    );
    assert_eq!(path.as_str(), expected);
}
