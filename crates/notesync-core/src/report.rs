//! Sync reports

use serde::{Deserialize, Serialize};

use crate::direction::{SectionPlan, SyncDirection};

/// Result of syncing one note to one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Vault-relative path the note was read from
    pub source: String,
    /// Vault-relative path the note was written to
    pub target: String,
    /// Whether the target did not exist before
    pub created: bool,
    /// Per-section decisions
    pub sections: Vec<SectionPlan>,
    /// Whether target-only sections were written back to the source
    #[serde(default)]
    pub back_synced: bool,
}

impl FileOutcome {
    /// Whether any section exists only on the target side.
    pub fn has_target_to_source(&self) -> bool {
        self.sections
            .iter()
            .any(|s| s.direction == SyncDirection::TargetToSource)
    }
}

/// Report from a sync, init or batch operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Whether the operation completed without errors
    pub success: bool,
    /// Notes synced, in processing order
    pub files: Vec<FileOutcome>,
    /// Actions taken during the operation
    pub actions: Vec<String>,
    /// Errors encountered during the operation
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Create a successful sync report
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    /// Add an action to the report
    pub fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }

    /// Record a synced note
    pub fn record(&mut self, outcome: FileOutcome) {
        self.actions
            .push(format!("Synced {} -> {}", outcome.source, outcome.target));
        if outcome.back_synced {
            self.actions
                .push(format!("Synced back {} -> {}", outcome.target, outcome.source));
        }
        self.files.push(outcome);
    }

    /// Record a failure; the report is no longer successful
    pub fn fail(&mut self, error: String) {
        self.success = false;
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(back_synced: bool) -> FileOutcome {
        FileOutcome {
            source: "content/pages/a.md".to_string(),
            target: "logseq/pages/a.md".to_string(),
            created: true,
            sections: Vec::new(),
            back_synced,
        }
    }

    #[test]
    fn test_record_adds_actions() {
        let mut report = SyncReport::success();
        report.record(outcome(true));
        assert_eq!(report.files.len(), 1);
        assert_eq!(
            report.actions,
            vec![
                "Synced content/pages/a.md -> logseq/pages/a.md",
                "Synced back logseq/pages/a.md -> content/pages/a.md",
            ]
        );
    }

    #[test]
    fn test_fail_marks_report_unsuccessful() {
        let mut report = SyncReport::success();
        report.record(outcome(false));
        report.fail("boom".to_string());
        assert!(!report.success);
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.errors, vec!["boom"]);
    }
}
