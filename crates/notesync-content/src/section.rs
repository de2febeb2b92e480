//! Section extraction and reconstruction
//!
//! A note body is split at level-2 headings (`## ` followed by
//! whitespace). Each section is keyed by a slug of its heading; text before
//! the first heading becomes the reserved [`CONTENT_SECTION`].
//!
//! Reconstruction is not byte-exact: headings are rebuilt from slugs, so
//! `## Reading List` and `##   reading list` both come back as
//! `## Reading List`.

use crate::convert::is_fence;

/// Name of the untitled section before the first heading.
pub const CONTENT_SECTION: &str = "content";

/// An ordered mapping of section name to section text.
///
/// Insertion order is discovery order. Inserting an existing name replaces
/// its text but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    /// Create an empty section map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((name, text)),
        }
    }

    /// Text of a section, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Section names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for Sections {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut sections = Sections::new();
        for (name, text) in iter {
            sections.insert(name, text);
        }
        sections
    }
}

impl IntoIterator for Sections {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Heading text of a level-2 heading line, if the line is one.
fn level2_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if rest.starts_with(|c: char| c.is_whitespace()) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Normalize heading text into a section name.
pub fn slugify(heading: &str) -> String {
    heading.trim().to_lowercase().replace(' ', "_")
}

/// Split a note body into named sections.
///
/// Heading-looking lines inside fenced code blocks do not open a section.
pub fn extract_sections(body: &str) -> Sections {
    let mut sections = Sections::new();
    let mut current = CONTENT_SECTION.to_string();
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
        }

        match level2_heading(line).filter(|_| !in_fence) {
            Some(heading) => {
                if !lines.is_empty() {
                    sections.insert(current, lines.join("\n").trim());
                    lines.clear();
                }
                current = slugify(heading);
            }
            None => lines.push(line),
        }
    }

    if !lines.is_empty() {
        sections.insert(current, lines.join("\n").trim());
    }

    sections
}

/// Capitalize the first character of a word and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-case whitespace separated words: `"my note"` -> `"My Note"`.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rebuild heading text from a section name: `reading_list` -> `Reading List`.
pub fn heading_for(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reassemble a body from sections.
///
/// The `content` section comes first without a heading; every other
/// non-empty section follows under a reconstructed `##` heading. Blocks are
/// separated by blank lines.
pub fn reconstruct_content(sections: &Sections) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(content) = sections.get(CONTENT_SECTION)
        && !content.trim().is_empty()
    {
        blocks.push(content.to_string());
    }

    for (name, text) in sections.iter() {
        if name == CONTENT_SECTION || text.trim().is_empty() {
            continue;
        }
        blocks.push(format!("## {}\n\n{}", heading_for(name), text));
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level2_heading_requires_whitespace() {
        assert_eq!(level2_heading("## Notes"), Some("Notes"));
        assert_eq!(level2_heading("##\tNotes "), Some("Notes"));
        assert_eq!(level2_heading("### Notes"), None);
        assert_eq!(level2_heading("##Notes"), None);
        assert_eq!(level2_heading("# Notes"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Reading List"), "reading_list");
        assert_eq!(slugify("  Notes "), "notes");
    }

    #[test]
    fn test_sections_insert_keeps_first_position() {
        let mut sections = Sections::new();
        sections.insert("a", "1");
        sections.insert("b", "2");
        sections.insert("a", "3");
        assert_eq!(sections.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(sections.get("a"), Some("3"));
    }

    #[test]
    fn test_heading_for() {
        assert_eq!(heading_for("reading_list"), "Reading List");
        assert_eq!(heading_for("notes"), "Notes");
        assert_eq!(heading_for("API_design"), "Api Design");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my note"), "My Note");
        assert_eq!(title_case("THE  big   idea"), "The Big Idea");
    }

    #[test]
    fn test_empty_heading_section_is_not_emitted() {
        let sections = extract_sections("## First\n## Second\n- item");
        assert!(!sections.contains("first"));
        assert_eq!(sections.get("second"), Some("- item"));
    }

    #[test]
    fn test_blank_only_section_is_emitted_empty() {
        let sections = extract_sections("## First\n\n## Second\ntext");
        assert_eq!(sections.get("first"), Some(""));
    }
}
