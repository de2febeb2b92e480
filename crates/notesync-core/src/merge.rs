//! Section merging

use notesync_content::{FormatStyle, Sections, convert, translate_references};
use notesync_meta::{Location, NoteSchema};

use crate::direction::{SectionPlan, SyncDirection};

/// Section formats on both sides of a sync, as declared by the schema.
#[derive(Debug, Clone, Copy)]
pub struct SectionFormats<'a> {
    pub schema: &'a NoteSchema,
    pub note_type: &'a str,
    pub source: Location,
    pub target: Location,
}

impl SectionFormats<'_> {
    /// Source and target format of a section.
    pub fn formats(&self, section: &str) -> (FormatStyle, FormatStyle) {
        let policy = self.schema.section_policy(self.note_type, section);
        (policy.format_for(self.source), policy.format_for(self.target))
    }

    /// Convert source text of a section into the target's format and
    /// reference syntax.
    pub fn convert(&self, section: &str, text: &str) -> String {
        let (from, to) = self.formats(section);
        translate_references(&convert(text, from, to), self.target.reference_style())
    }

    /// Convert every source section, for a target that does not exist yet.
    pub fn convert_all(&self, source: &Sections) -> Sections {
        source
            .iter()
            .map(|(name, text)| (name, self.convert(name, text)))
            .collect()
    }
}

/// Build the merged section map from per-section decisions.
pub fn merge_sections(
    source: &Sections,
    target: &Sections,
    plan: &[SectionPlan],
    formats: &SectionFormats<'_>,
) -> Sections {
    let mut merged = Sections::new();

    for section in plan {
        let name = section.name.as_str();
        match section.direction {
            SyncDirection::None | SyncDirection::TargetToSource => {
                merged.insert(name, target.get(name).unwrap_or_default());
            }
            SyncDirection::SourceToTarget => {
                let text = source.get(name).unwrap_or_default();
                merged.insert(name, formats.convert(name, text));
            }
            SyncDirection::TargetOnly => {
                if let Some(text) = target.get(name) {
                    merged.insert(name, text);
                }
            }
            SyncDirection::SourceOnly | SyncDirection::Ignore => {}
        }
    }

    merged
}
