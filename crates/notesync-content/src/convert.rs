//! Structural conversion between section renderings
//!
//! Outline-style notes render sections as bullet lists, prose-style notes
//! as paragraphs or blockquotes. Conversion is lossy: bullet nesting is
//! flattened into paragraphs and cannot be recovered on the way back.
//!
//! Fenced code regions are never converted. A fence opens and closes on a
//! line whose trimmed text starts with three backticks; every line from the
//! opening fence through the closing fence is emitted verbatim and
//! contiguously.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Rendering style of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    Bullets,
    Paragraphs,
    Blockquotes,
}

impl FormatStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullets => "bullets",
            Self::Paragraphs => "paragraphs",
            Self::Blockquotes => "blockquotes",
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bullets" => Ok(Self::Bullets),
            "paragraphs" => Ok(Self::Paragraphs),
            "blockquotes" => Ok(Self::Blockquotes),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Whether a line opens or closes a fenced code region.
pub fn is_fence(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// Whether a line is an ATX heading (`#` through `######` plus a space).
pub fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
}

/// A run of lines that is either convertible text or a verbatim code region.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(Vec<&'a str>),
    Code(Vec<&'a str>),
}

/// Split text into alternating text and code segments.
///
/// An unterminated fence extends to the end of the text.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(mut block) = code.take() {
            block.push(line);
            if is_fence(line) {
                out.push(Segment::Code(block));
            } else {
                code = Some(block);
            }
            continue;
        }

        if is_fence(line) {
            if !prose.is_empty() {
                out.push(Segment::Text(std::mem::take(&mut prose)));
            }
            code = Some(vec![line]);
        } else {
            prose.push(line);
        }
    }

    if let Some(block) = code {
        out.push(Segment::Code(block));
    }
    if !prose.is_empty() {
        out.push(Segment::Text(prose));
    }
    out
}

/// Strip indentation and a leading `-` bullet marker.
fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('-') {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => trimmed,
    }
}

/// Strip indentation and a leading `>` quote marker.
fn strip_quote(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('>') {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}

fn flush(current: &mut String, blocks: &mut Vec<String>) {
    if !current.is_empty() {
        blocks.push(std::mem::take(current));
    }
}

/// Flatten a bullet list into paragraphs.
///
/// Each top-level bullet starts a paragraph; indented lines are joined onto
/// the paragraph of the bullet they belong to.
pub fn bullets_to_paragraphs(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();

    for segment in segments(text) {
        match segment {
            Segment::Code(lines) => {
                flush(&mut current, &mut blocks);
                blocks.push(lines.join("\n"));
            }
            Segment::Text(lines) => {
                for line in lines {
                    if line.trim().is_empty() {
                        flush(&mut current, &mut blocks);
                        continue;
                    }

                    if is_heading(line) {
                        flush(&mut current, &mut blocks);
                        blocks.push(line.to_string());
                        continue;
                    }

                    let clean = strip_bullet(line);
                    if line.starts_with(' ') || line.starts_with('\t') {
                        if !current.is_empty() {
                            current.push(' ');
                        }
                        current.push_str(clean);
                    } else {
                        flush(&mut current, &mut blocks);
                        current.push_str(clean);
                    }
                }
            }
        }
    }
    flush(&mut current, &mut blocks);

    blocks.join("\n\n")
}

/// Turn blank-line separated paragraphs into bullets.
///
/// The first line of a paragraph becomes a top-level bullet and the rest
/// become indented continuation lines. A paragraph that opens with a
/// heading keeps the heading and bullets each remaining line.
pub fn paragraphs_to_bullets(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for segment in segments(text) {
        match segment {
            Segment::Code(lines) => out.push(lines.join("\n")),
            Segment::Text(lines) => {
                for paragraph in lines.split(|l| l.trim().is_empty()) {
                    let Some((first, rest)) = paragraph.split_first() else {
                        continue;
                    };

                    if is_heading(first) {
                        out.push(first.trim().to_string());
                        out.extend(rest.iter().map(|l| format!("- {}", l.trim())));
                    } else {
                        out.push(format!("- {}", first.trim()));
                        out.extend(rest.iter().map(|l| format!("  {}", l.trim())));
                    }
                }
            }
        }
    }

    out.join("\n")
}

/// Apply a line mapping to every non-blank line outside code regions.
fn map_lines(text: &str, f: impl Fn(&str) -> String) -> String {
    let mut out: Vec<String> = Vec::new();
    for segment in segments(text) {
        match segment {
            Segment::Code(lines) => out.extend(lines.into_iter().map(str::to_string)),
            Segment::Text(lines) => out.extend(lines.into_iter().map(|line| {
                if line.trim().is_empty() {
                    line.to_string()
                } else {
                    f(line)
                }
            })),
        }
    }
    out.join("\n")
}

/// Replace bullet markers with quote markers, line by line.
pub fn bullets_to_blockquotes(text: &str) -> String {
    map_lines(text, |line| format!("> {}", strip_bullet(line)))
}

/// Replace quote markers with bullet markers, line by line.
pub fn blockquotes_to_bullets(text: &str) -> String {
    map_lines(text, |line| format!("- {}", strip_quote(line)))
}

static BLOCK_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\(([A-Za-z0-9-]+)\)\)").unwrap());

static PAGE_EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{embed \[\[([^\]]+)\]\]\}\}").unwrap());

/// How a location writes block references and page embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStyle {
    /// `((block-id))` and `{{embed [[page]]}}`, kept as written
    Outline,
    /// `[[^block-id]]` and `![[page]]`
    Wiki,
    /// Block references become a placeholder, embeds become links
    Web,
}

/// Rewrite outline block references and page embeds for another location.
///
/// Code regions are left alone.
pub fn translate_references(text: &str, style: ReferenceStyle) -> String {
    let (block, embed) = match style {
        ReferenceStyle::Outline => return text.to_string(),
        ReferenceStyle::Wiki => ("[[^${1}]]", "![[${1}]]"),
        ReferenceStyle::Web => ("[*Block Reference*]", "See: [${1}](${1})"),
    };
    if !BLOCK_REF.is_match(text) && !PAGE_EMBED.is_match(text) {
        return text.to_string();
    }
    let mut out = map_lines(text, |line| {
        let line = BLOCK_REF.replace_all(line, block);
        PAGE_EMBED.replace_all(&line, embed).into_owned()
    });
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Convert section text from one rendering style to another.
///
/// Identity when `from == to`. Pairs without a defined conversion
/// (paragraphs and blockquotes) are returned unchanged.
pub fn convert(text: &str, from: FormatStyle, to: FormatStyle) -> String {
    use FormatStyle::*;

    match (from, to) {
        _ if from == to => text.to_string(),
        (Bullets, Paragraphs) => bullets_to_paragraphs(text),
        (Paragraphs, Bullets) => paragraphs_to_bullets(text),
        (Bullets, Blockquotes) => bullets_to_blockquotes(text),
        (Blockquotes, Bullets) => blockquotes_to_bullets(text),
        _ => {
            tracing::debug!(%from, %to, "no conversion defined, keeping text as is");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_references_for_wiki() {
        assert_eq!(
            translate_references("- see ((64a1-b2)) and {{embed [[Dune]]}}", ReferenceStyle::Wiki),
            "- see [[^64a1-b2]] and ![[Dune]]"
        );
    }

    #[test]
    fn test_references_for_web() {
        assert_eq!(
            translate_references("see ((abc))\n\n{{embed [[Arrakis Notes]]}}", ReferenceStyle::Web),
            "see [*Block Reference*]\n\nSee: [Arrakis Notes](Arrakis Notes)"
        );
    }

    #[test]
    fn test_references_untouched_in_code_and_outline() {
        let text = "```\n((abc))\n```\n((abc))";
        assert_eq!(
            translate_references(text, ReferenceStyle::Wiki),
            "```\n((abc))\n```\n[[^abc]]"
        );
        assert_eq!(translate_references(text, ReferenceStyle::Outline), text);
        assert_eq!(translate_references("plain\n", ReferenceStyle::Web), "plain\n");
    }

    #[test]
    fn test_segments_split_code() {
        let segs = segments("a\n```\ncode\n```\nb");
        assert_eq!(
            segs,
            vec![
                Segment::Text(vec!["a"]),
                Segment::Code(vec!["```", "code", "```"]),
                Segment::Text(vec!["b"]),
            ]
        );
    }

    #[test]
    fn test_segments_unterminated_fence() {
        let segs = segments("a\n```rust\nfn main() {}");
        assert_eq!(
            segs,
            vec![
                Segment::Text(vec!["a"]),
                Segment::Code(vec!["```rust", "fn main() {}"]),
            ]
        );
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- alpha"), "alpha");
        assert_eq!(strip_bullet("    -   nested"), "nested");
        assert_eq!(strip_bullet("  continuation"), "continuation");
        assert_eq!(strip_bullet("-5 degrees"), "-5 degrees");
        assert_eq!(strip_bullet("-"), "");
    }

    #[test]
    fn test_is_heading() {
        assert!(is_heading("# Title"));
        assert!(is_heading("### Sub"));
        assert!(is_heading("##"));
        assert!(!is_heading("#tag"));
        assert!(!is_heading("####### seven"));
        assert!(!is_heading("- # not"));
    }

    #[test]
    fn test_format_style_from_str() {
        assert_eq!("Bullets".parse::<FormatStyle>().unwrap(), FormatStyle::Bullets);
        assert!("tables".parse::<FormatStyle>().is_err());
    }
}
