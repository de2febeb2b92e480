//! Tests for parsing and rendering notes in both encodings

use notesync_content::{MetadataEncoding, Note};
use pretty_assertions::assert_eq;
use serde_yaml::Value;

#[test]
fn test_properties_to_frontmatter() {
    let note = Note::parse("title:: Dune\ntype:: book\n\n## Notes\n- spice").unwrap();
    let rendered = note.render(MetadataEncoding::Frontmatter);

    assert_eq!(
        rendered,
        "---\ntitle: Dune\ntype: book\n---\n\n## Notes\n- spice\n"
    );
}

#[test]
fn test_frontmatter_to_properties() {
    let note =
        Note::parse("---\ntitle: Dune\ncategories:\n- book\n- scifi\n---\n\nSpice.").unwrap();
    let rendered = note.render(MetadataEncoding::Properties);

    assert_eq!(rendered, "categories:: book, scifi\ntitle:: Dune\n\nSpice.\n");
}

#[test]
fn test_reparse_rendered_frontmatter() {
    let note = Note::parse("---\ntitle: Dune\ninteractive: true\n---\n\nSpice.").unwrap();
    let again = Note::parse(&note.render(MetadataEncoding::Frontmatter)).unwrap();

    assert_eq!(again, note);
    assert_eq!(again.metadata["interactive"], Value::Bool(true));
}

#[test]
fn test_sections_from_note() {
    let note = Note::parse("title:: Dune\n\nIntro\n\n## Notes\n- spice").unwrap();
    let sections = note.sections();
    assert_eq!(sections.get("content"), Some("Intro"));
    assert_eq!(sections.get("notes"), Some("- spice"));
}

#[test]
fn test_malformed_frontmatter_is_error() {
    assert!(Note::parse("---\ntitle: [unclosed\n---\nBody").is_err());
}
