//! Host editor collaborator
//!
//! The engine never touches a document itself; a host hands it text and
//! applies the finished plan as one atomic multi-edit. `FileHost` is the
//! on-disk implementation used by the CLI; tests inject in-memory hosts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

use crate::engine::{self, Config, Outcome};
use crate::planner::EditPlan;

/// Injected editor capabilities consumed by [`run_extraction`].
pub trait EditorHost {
    /// Current document text
    fn text(&self) -> Result<String>;

    /// Apply the whole plan atomically
    fn apply(&mut self, plan: &EditPlan) -> Result<()>;

    /// Surface a human-readable confirmation
    fn notify(&self, message: &str);
}

/// Run one extraction against a host: read, plan, apply, notify.
pub fn run_extraction(
    host: &mut dyn EditorHost,
    offset: usize,
    config: &Config,
) -> Result<Outcome> {
    let source = host.text()?;
    let outcome = engine::extract(&source, offset, config)?;

    if let Outcome::Planned(planned) = &outcome {
        host.apply(&planned.plan)?;
        host.notify(&format!("Added style: {}", planned.name));
    }

    Ok(outcome)
}

/// Apply a plan to `source`, producing the edited text.
///
/// Edits are applied back-to-front so every range keeps addressing the
/// original document.
pub fn apply_plan(source: &str, plan: &EditPlan) -> String {
    let mut text = source.to_string();
    for edit in plan.edits.iter().rev() {
        text.replace_range(edit.range.start..edit.range.end, &edit.replacement);
    }
    text
}

/// File-backed host. Writes go through an atomic temp-file + rename
/// transaction, so a crash never leaves a half-edited document behind.
pub struct FileHost {
    path: PathBuf,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EditorHost for FileHost {
    fn text(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }

    fn apply(&mut self, plan: &EditPlan) -> Result<()> {
        let source = self.text()?;
        let edited = apply_plan(&source, plan);
        EditTransaction::begin(&self.path).commit(&edited)
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

/// Single-file atomic write: temp file in the same directory, then rename.
struct EditTransaction {
    file_path: PathBuf,
    temp_file_path: Option<PathBuf>,
}

impl EditTransaction {
    fn begin(file_path: &Path) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            temp_file_path: None,
        }
    }

    fn commit(mut self, content: &str) -> Result<()> {
        let base_name = self
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("stylelift_edit");
        let temp_name = format!("{}.tmp.{}", base_name, Uuid::new_v4().simple());
        let temp_path = self.file_path.with_file_name(&temp_name);

        // Write to temp file first
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        self.temp_file_path = Some(temp_path.clone());

        // Atomic rename (this is the commit point)
        fs::rename(&temp_path, &self.file_path)
            .with_context(|| format!("Failed to replace {}", self.file_path.display()))?;

        debug!("Committed edits to {}", self.file_path.display());
        Ok(())
    }
}

impl Drop for EditTransaction {
    fn drop(&mut self) {
        // Clean up the temp file if the transaction never reached its rename
        if let Some(temp_path) = &self.temp_file_path {
            if temp_path.exists() {
                let _ = fs::remove_file(temp_path);
            }
        }
    }
}
