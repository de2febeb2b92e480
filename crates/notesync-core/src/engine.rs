//! SyncEngine implementation
//!
//! The SyncEngine coordinates notes between the content tree and the
//! platform trees of a vault. One sync reads the source note, resolves the
//! target path, decides a direction per section, merges sections and
//! metadata, and writes the result in the target's metadata encoding.

use std::fmt;
use std::fs;
use std::str::FromStr;

use chrono::NaiveDate;
use notesync_content::{Metadata, Note, Sections, reconstruct_content};
use notesync_fs::{NormalizedPath, io};
use notesync_meta::transform::rules_for;
use notesync_meta::{
    Location, NoteSchema, Platform, SchemaLoader, SyncConfig, TransformContext, transform,
};

use crate::changes::{ChangeScope, modified_notes};
use crate::direction::{SectionPlan, SyncDirection, resolve_directions};
use crate::frontmatter::{MetadataContext, merge_metadata};
use crate::layout::resolve_target_path;
use crate::merge::{SectionFormats, merge_sections};
use crate::report::{FileOutcome, SyncReport};
use crate::{Error, Result};

const INTERACTIVE_EXTENSION: &str = "qmd";

/// Where a sync writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Platform(Platform),
    /// Every platform other than the source
    All,
}

impl Target {
    /// Platforms to sync to from `source`.
    pub fn platforms(&self, source: Location) -> Result<Vec<Platform>> {
        match self {
            Self::All => Ok(Platform::ALL
                .into_iter()
                .filter(|p| source.platform() != Some(*p))
                .collect()),
            Self::Platform(p) if source.platform() == Some(*p) => Err(Error::SameLocation {
                location: p.to_string(),
            }),
            Self::Platform(p) => Ok(vec![*p]),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform(p) => write!(f, "{}", p),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for Target {
    type Err = notesync_meta::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Platform)
    }
}

/// Options for sync operations
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Write target-only sections back to the source after syncing
    pub bidirectional: bool,
    /// Date used for `date`/`created` defaults
    pub today: NaiveDate,
    /// Limit batch syncs to notes git reports as modified
    pub changes: Option<ChangeScope>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            bidirectional: false,
            today: chrono::Local::now().date_naive(),
            changes: None,
        }
    }
}

/// A merged note ready to be written.
struct Prepared {
    note: Note,
    target_abs: NormalizedPath,
    outcome: FileOutcome,
}

/// Engine for synchronizing notes across a vault
///
/// Configuration and schema are loaded once and shared read-only by every
/// operation.
pub struct SyncEngine {
    /// Vault root
    root: NormalizedPath,
    config: SyncConfig,
    schema: NoteSchema,
}

impl SyncEngine {
    /// Create a new SyncEngine
    pub fn new(root: NormalizedPath, config: SyncConfig, schema: NoteSchema) -> Self {
        Self {
            root,
            config,
            schema,
        }
    }

    /// Open a vault: discover its config and load its schema.
    pub fn open(root: NormalizedPath, config_path: Option<&NormalizedPath>) -> Result<Self> {
        let config = SyncConfig::discover(&root, config_path)?;
        let schema = SchemaLoader::new().load(&root.join(&config.schema_file));
        Ok(Self::new(root, config, schema))
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn schema(&self) -> &NoteSchema {
        &self.schema
    }

    fn absolute(&self, path: &NormalizedPath) -> NormalizedPath {
        if path.to_native().is_absolute() {
            path.clone()
        } else {
            self.root.join(path.as_str())
        }
    }

    fn relative(&self, path: &NormalizedPath) -> NormalizedPath {
        path.strip_prefix(&self.root)
            .unwrap_or_else(|| path.clone())
    }

    /// Read a note; an unreadable or unparseable note is treated as empty.
    ///
    /// Callers check existence first, so a missing file never gets here.
    fn read_note(&self, path: &NormalizedPath) -> Note {
        let text = match io::read_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path, "failed to read note, treating it as empty: {}", e);
                return Note::default();
            }
        };
        Note::parse(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path, "failed to parse note, treating it as empty: {}", e);
            Note::default()
        })
    }

    /// Tree a source note was read from.
    fn source_dir(&self, location: Location, file: &NormalizedPath) -> &str {
        match location {
            Location::Platform(Platform::Publish)
                if file.is_within_dir(self.config.visualization_dir()) =>
            {
                self.config.visualization_dir()
            }
            other => self.config.dir(other),
        }
    }

    /// Where a source note lands at `target`, vault-relative.
    pub fn target_path(
        &self,
        source_file: &NormalizedPath,
        source: Location,
        target: Location,
    ) -> Result<NormalizedPath> {
        let abs = self.absolute(source_file);
        if !abs.is_file() {
            return Err(Error::FileNotFound {
                location: source.to_string(),
                name: source_file.to_string(),
            });
        }
        let rel = self.relative(&abs);
        let note = self.read_note(&abs);
        Ok(resolve_target_path(
            &self.config,
            &rel,
            self.source_dir(source, &rel),
            target,
            &note.metadata,
        ))
    }

    /// Merge a source note into a target path without writing anything.
    fn prepare(
        &self,
        source_rel: &NormalizedPath,
        source: Location,
        target_rel: &NormalizedPath,
        target: Location,
        today: NaiveDate,
    ) -> Result<Prepared> {
        let source_note = self.read_note(&self.absolute(source_rel));
        let note_type = source_note.note_type();
        let source_sections = source_note.sections();

        let formats = SectionFormats {
            schema: &self.schema,
            note_type: &note_type,
            source,
            target,
        };

        let target_abs = self.absolute(target_rel);
        let existing = if target_abs.is_file() {
            Some(self.read_note(&target_abs))
        } else {
            None
        };

        let (sections, plan, target_metadata) = match &existing {
            Some(target_note) => {
                let target_sections = target_note.sections();
                let plan = resolve_directions(
                    &source_sections,
                    &target_sections,
                    &note_type,
                    &self.schema,
                    source,
                    target,
                );
                let merged = merge_sections(&source_sections, &target_sections, &plan, &formats);
                (merged, plan, target_note.metadata.clone())
            }
            None => {
                let plan: Vec<SectionPlan> = source_sections
                    .names()
                    .map(|name| SectionPlan::new(name, SyncDirection::SourceToTarget))
                    .collect();
                (formats.convert_all(&source_sections), plan, Metadata::new())
            }
        };

        let ctx = MetadataContext {
            location: target,
            required_keys: self.config.required_keys(target),
            note_type: &note_type,
            file_path: target_rel,
            today,
        };
        let metadata = merge_metadata(&source_note.metadata, &target_metadata, &ctx);

        Ok(Prepared {
            note: Note::new(metadata, reconstruct_content(&sections)),
            target_abs,
            outcome: FileOutcome {
                source: source_rel.to_string(),
                target: target_rel.to_string(),
                created: existing.is_none(),
                sections: plan,
                back_synced: false,
            },
        })
    }

    /// Sync one note pair and, when asked, write target-owned sections back.
    fn sync_pair(
        &self,
        source_rel: &NormalizedPath,
        source: Location,
        target_rel: &NormalizedPath,
        target: Location,
        options: &SyncOptions,
    ) -> Result<FileOutcome> {
        let prepared = self.prepare(source_rel, source, target_rel, target, options.today)?;
        io::write_text(
            &prepared.target_abs,
            &prepared.note.render(target.encoding()),
        )?;

        let mut outcome = prepared.outcome;
        tracing::info!(
            source = %outcome.source,
            target = %outcome.target,
            created = outcome.created,
            "synced note"
        );

        if options.bidirectional && outcome.has_target_to_source() {
            tracing::info!(source = %target_rel, target = %source_rel, "syncing back");
            self.write_back(source_rel, source, &prepared.note, target, &outcome.sections)?;
            outcome.back_synced = true;
        }

        Ok(outcome)
    }

    /// Copy the sections planned `TargetToSource` into the source note.
    ///
    /// Every other source section and all source metadata stay as they are.
    fn write_back(
        &self,
        source_rel: &NormalizedPath,
        source: Location,
        written: &Note,
        target: Location,
        plan: &[SectionPlan],
    ) -> Result<()> {
        // Read strictly: an unreadable source is never replaced
        let source_abs = self.absolute(source_rel);
        let source_note = Note::parse(&io::read_text(&source_abs)?)?;
        let note_type = source_note.note_type();
        let written_sections = written.sections();

        let formats = SectionFormats {
            schema: &self.schema,
            note_type: &note_type,
            source: target,
            target: source,
        };

        let mut sections: Sections = source_note.sections();
        for entry in plan
            .iter()
            .filter(|entry| entry.direction == SyncDirection::TargetToSource)
        {
            if let Some(text) = written_sections.get(&entry.name) {
                sections.insert(entry.name.as_str(), formats.convert(&entry.name, text));
            }
        }

        let note = Note::new(source_note.metadata, reconstruct_content(&sections));
        io::write_text(&source_abs, &note.render(source.encoding()))?;
        Ok(())
    }

    /// Sync one note from `source` to `target`.
    pub fn sync_file(
        &self,
        source_file: &NormalizedPath,
        source: Location,
        target: Location,
        options: &SyncOptions,
    ) -> Result<FileOutcome> {
        if source == target {
            return Err(Error::SameLocation {
                location: source.to_string(),
            });
        }
        let target_rel = self.target_path(source_file, source, target)?;
        let source_rel = self.relative(&self.absolute(source_file));
        self.sync_pair(&source_rel, source, &target_rel, target, options)
    }

    /// Per-section decisions for one note pair, without writing.
    pub fn plan(
        &self,
        source_file: &NormalizedPath,
        source: Location,
        target: Location,
    ) -> Result<FileOutcome> {
        if source == target {
            return Err(Error::SameLocation {
                location: source.to_string(),
            });
        }
        let target_rel = self.target_path(source_file, source, target)?;
        let source_rel = self.relative(&self.absolute(source_file));
        let today = SyncOptions::default().today;
        Ok(self
            .prepare(&source_rel, source, &target_rel, target, today)?
            .outcome)
    }

    /// Find a note by file name in a location's trees, vault-relative.
    pub fn locate_file(&self, source: Location, name: &str) -> Result<NormalizedPath> {
        let candidates: Vec<NormalizedPath> = match source {
            Location::Platform(Platform::Personal) => {
                let dir = NormalizedPath::new(&self.config.personal.target_dir);
                self.config
                    .personal
                    .folders
                    .values()
                    .map(|folder| dir.join(folder).join(name))
                    .chain(std::iter::once(dir.join(name)))
                    .collect()
            }
            Location::Platform(Platform::Publish) => {
                let qmd = NormalizedPath::new(name).with_extension(INTERACTIVE_EXTENSION);
                [
                    self.config.publish.target_dir.as_str(),
                    self.config.visualization_dir(),
                ]
                .into_iter()
                .flat_map(|dir| {
                    let dir = NormalizedPath::new(dir);
                    [dir.join(name), dir.join(qmd.as_str())]
                })
                .collect()
            }
            other => vec![NormalizedPath::new(self.config.dir(other)).join(name)],
        };

        candidates
            .into_iter()
            .find(|candidate| self.absolute(candidate).is_file())
            .ok_or_else(|| Error::FileNotFound {
                location: source.to_string(),
                name: name.to_string(),
            })
    }

    /// Every note in a location's trees, vault-relative and sorted.
    pub fn discover(&self, source: Location) -> Result<Vec<NormalizedPath>> {
        let extensions: &[&str] = match source {
            Location::Platform(Platform::Publish) => &["md", INTERACTIVE_EXTENSION],
            _ => &["md"],
        };

        let mut files = Vec::new();
        for dir in self.config.source_dirs(source) {
            let abs = self.root.join(dir);
            if abs.is_dir() {
                self.walk(&abs, extensions, &mut files)?;
            } else {
                tracing::debug!(dir = %abs, "source directory does not exist");
            }
        }

        let mut files: Vec<NormalizedPath> = files.iter().map(|f| self.relative(f)).collect();
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn walk(
        &self,
        dir: &NormalizedPath,
        extensions: &[&str],
        out: &mut Vec<NormalizedPath>,
    ) -> Result<()> {
        let entries = fs::read_dir(dir.to_native())
            .map_err(|e| Error::Fs(notesync_fs::Error::io(dir.to_native(), e)))?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(dir = %dir, "skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = NormalizedPath::new(entry.path());
            if self.config.is_skipped(&path) {
                tracing::debug!(path = %path, "skipping generated or config path");
                continue;
            }
            if path.is_dir() {
                self.walk(&path, extensions, out)?;
            } else if path.extension().is_some_and(|ext| extensions.contains(&ext)) {
                out.push(path);
            }
        }
        Ok(())
    }

    /// Sync every note of `source` to `target`.
    ///
    /// Failures are isolated per note and listed in the report. With
    /// [`SyncOptions::changes`] set, only notes git reports as modified are
    /// synced.
    pub fn sync_all(
        &self,
        source: Location,
        target: Target,
        options: &SyncOptions,
    ) -> Result<SyncReport> {
        let platforms = target.platforms(source)?;
        let mut files = self.discover(source)?;
        if let Some(scope) = &options.changes {
            let modified = modified_notes(&self.root, scope)?;
            let found = files.len();
            files.retain(|file| modified.contains(file.as_str()));
            tracing::info!(%scope, found, modified = files.len(), "limited sync to modified notes");
        }
        let mut report = SyncReport::success();

        for platform in platforms {
            for file in &files {
                match self.sync_file(file, source, platform.into(), options) {
                    Ok(outcome) => report.record(outcome),
                    Err(e) => {
                        tracing::warn!(file = %file, target = %platform, "sync failed: {}", e);
                        report.fail(format!("{} -> {}: {}", file, platform, e));
                    }
                }
            }
            tracing::info!(%source, target = %platform, files = files.len(), "synchronized location");
        }

        Ok(report)
    }

    /// Sync one named note of `source` to `target`.
    pub fn sync_named(
        &self,
        source: Location,
        target: Target,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncReport> {
        let platforms = target.platforms(source)?;
        let file = self.locate_file(source, name)?;
        let mut report = SyncReport::success();

        for platform in platforms {
            report.record(self.sync_file(&file, source, platform.into(), options)?);
        }
        Ok(report)
    }

    /// Create the vault skeleton and the default schema. Idempotent.
    pub fn init(&self) -> Result<SyncReport> {
        let personal = NormalizedPath::new(&self.config.personal.target_dir);
        let folders: Vec<NormalizedPath> = self
            .config
            .personal
            .folders
            .values()
            .map(|folder| personal.join(folder))
            .collect();
        let mut dirs: Vec<&str> = Platform::ALL
            .iter()
            .map(|p| self.config.platform(*p).target_dir.as_str())
            .collect();
        dirs.extend(folders.iter().map(NormalizedPath::as_str));
        dirs.push(self.config.visualization_dir());
        dirs.push(&self.config.content_dir);

        let mut report = SyncReport::success();
        for dir in dirs {
            let abs = self.root.join(dir);
            if !abs.is_dir() {
                io::ensure_dir(&abs)?;
                report = report.with_action(format!("Created directory {}", dir));
            }
        }

        let schema_path = self.root.join(&self.config.schema_file);
        if SchemaLoader::new().write_default(&schema_path)? {
            report = report.with_action(format!("Wrote default schema {}", self.config.schema_file));
        }

        tracing::info!(actions = report.actions.len(), "initialized vault");
        Ok(report)
    }

    /// Rewrite one note's metadata for another platform.
    ///
    /// The body is kept; the note is written in the target platform's
    /// encoding to `output`, or over the input when no output is given.
    pub fn transform_file(
        &self,
        path: &NormalizedPath,
        from: Platform,
        to: Platform,
        output: Option<&NormalizedPath>,
        today: NaiveDate,
    ) -> Result<NormalizedPath> {
        rules_for(from, to)?;

        let abs = self.absolute(path);
        if !abs.is_file() {
            return Err(Error::FileNotFound {
                location: from.to_string(),
                name: path.to_string(),
            });
        }

        let note = Note::parse(&io::read_text(&abs)?)?;
        let metadata = transform(&note.metadata, from, to, &TransformContext::new(today))?;
        let out = output.map(|o| self.absolute(o)).unwrap_or(abs);

        io::write_text(&out, &Note::new(metadata, note.body).render(to.encoding()))?;
        tracing::info!(%from, %to, output = %out, "transformed note");
        Ok(out)
    }
}
