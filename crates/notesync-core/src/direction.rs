//! Per-section sync direction
//!
//! Only the two current snapshots of a section are compared; there is no
//! common ancestor. When both sides changed, the source wins.

use std::fmt;

use notesync_content::{Sections, Similarity, classify};
use notesync_meta::{Location, NoteSchema};
use serde::{Deserialize, Serialize};

/// What to do with one section of a note pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    /// Both sides agree; keep the target text
    None,
    /// Source text replaces the target, converted to the target format
    SourceToTarget,
    /// Only the target has it; keep it and offer it back to the source
    TargetToSource,
    /// Exists only at the source location; never written to the target
    SourceOnly,
    /// Exists only at the target location; kept if present
    TargetOnly,
    /// Not synced at all
    Ignore,
}

impl SyncDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SourceToTarget => "source_to_target",
            Self::TargetToSource => "target_to_source",
            Self::SourceOnly => "source_only",
            Self::TargetOnly => "target_only",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decision for one section name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPlan {
    pub name: String,
    pub direction: SyncDirection,
    /// Set when both sides had the section and were compared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<Similarity>,
}

impl SectionPlan {
    pub fn new(name: &str, direction: SyncDirection) -> Self {
        Self {
            name: name.to_string(),
            direction,
            similarity: None,
        }
    }
}

/// Names in source order, then target-only names in target order.
fn union_names<'a>(source: &'a Sections, target: &'a Sections) -> Vec<&'a str> {
    let mut names: Vec<&str> = source.names().collect();
    names.extend(target.names().filter(|n| !source.contains(n)));
    names
}

/// Decide a direction for every section present on either side.
pub fn resolve_directions(
    source: &Sections,
    target: &Sections,
    note_type: &str,
    schema: &NoteSchema,
    source_location: Location,
    target_location: Location,
) -> Vec<SectionPlan> {
    union_names(source, target)
        .into_iter()
        .map(|name| {
            let policy = schema.section_policy(note_type, name);

            let plan = if !policy.sync {
                let direction = if policy.is_exclusive_to(target_location) {
                    SyncDirection::TargetOnly
                } else if policy.is_exclusive_to(source_location) {
                    SyncDirection::SourceOnly
                } else {
                    SyncDirection::Ignore
                };
                SectionPlan::new(name, direction)
            } else {
                match (source.get(name), target.get(name)) {
                    (Some(a), Some(b)) => {
                        let similarity = classify(a, b);
                        let direction = if similarity.is_unchanged() {
                            SyncDirection::None
                        } else {
                            SyncDirection::SourceToTarget
                        };
                        SectionPlan {
                            name: name.to_string(),
                            direction,
                            similarity: Some(similarity),
                        }
                    }
                    (Some(_), None) => SectionPlan::new(name, SyncDirection::SourceToTarget),
                    _ => SectionPlan::new(name, SyncDirection::TargetToSource),
                }
            };

            tracing::debug!(section = name, direction = %plan.direction, "resolved section");
            plan
        })
        .collect()
}
