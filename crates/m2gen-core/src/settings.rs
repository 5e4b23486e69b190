use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{M2genError, Result};
use crate::input::{keys, Inputs};
use crate::merge::{build_settings, MergeSummary};
use crate::report::Reporter;
use crate::state::{RunState, STATE_GENERATED, STATE_KEY};
use crate::template::TemplateLibrary;
use crate::xml::Document;

/// `<home>/.m2/settings.xml`
pub fn default_settings_path(home: &Path) -> PathBuf {
    home.join(".m2").join("settings.xml")
}

/// The `path` input when given, the default location under `home` otherwise.
pub fn settings_path(inputs: &Inputs, home: &Path) -> PathBuf {
    match inputs.get(keys::PATH) {
        Some(path) => PathBuf::from(path),
        None => default_settings_path(home),
    }
}

/// Render `document` to `path`, creating the parent directory if needed.
pub fn write_settings(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| M2genError::Io {
            context: format!("creating directory {}", parent.display()),
            source: e,
        })?;
    }
    let content = document.to_xml_string()?;
    std::fs::write(path, content).map_err(|e| M2genError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Overwritten,
    /// The file already existed and `override` was not set.
    Skipped,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteOutcome::Written => "written",
            WriteOutcome::Overwritten => "overwritten",
            WriteOutcome::Skipped => "skipped",
        })
    }
}

/// Options for the `generate` operation.
pub struct GenerateOptions {
    pub inputs: Inputs,
    /// Home directory used for the default settings location.
    pub home: PathBuf,
    pub templates: TemplateLibrary,
}

pub struct GeneratedSettings {
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    /// `None` when the write was skipped.
    pub summary: Option<MergeSummary>,
}

/// Build settings.xml from the inputs and write it, unless a file is already
/// there and `override` is not set. Records the run state on success.
pub fn generate(
    options: &GenerateOptions,
    state: &mut dyn RunState,
    reporter: &mut dyn Reporter,
) -> Result<GeneratedSettings> {
    let path = settings_path(&options.inputs, &options.home);
    reporter.info(&format!("Prepare maven settings: {}", path.display()));

    let existed = path.exists();
    if existed {
        if options.inputs.is_true(keys::OVERRIDE) {
            reporter.info("maven settings.xml already exists - override");
        } else {
            reporter.warning("maven settings.xml already exists - skip");
            return Ok(GeneratedSettings {
                path,
                outcome: WriteOutcome::Skipped,
                summary: None,
            });
        }
    }

    let merged = build_settings(&options.templates, &options.inputs, reporter)?;
    write_settings(&path, &merged.document)?;
    state.save(STATE_KEY, STATE_GENERATED)?;

    let outcome = if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Written
    };
    reporter.info(&format!("maven settings.xml {outcome}: {}", path.display()));

    Ok(GeneratedSettings {
        path,
        outcome,
        summary: Some(merged.summary),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    AlreadyMissing,
    /// No generate step recorded state in this job.
    NotGenerated,
    /// Deleting failed; the message has the reason.
    RemoveFailed(String),
}

/// Remove the settings file written by an earlier `generate` of the same
/// job. Never fails: every problem ends up as a reported outcome.
pub fn cleanup(
    inputs: &Inputs,
    home: &Path,
    state: &mut dyn RunState,
    reporter: &mut dyn Reporter,
) -> CleanupOutcome {
    let path = settings_path(inputs, home);
    let prefix = format!("Cleanup maven settings: {}", path.display());

    let generated = match state.get(STATE_KEY) {
        Ok(value) => value.as_deref() == Some(STATE_GENERATED),
        Err(e) => {
            reporter.warning(&format!("{prefix} - could not read run state: {e}"));
            false
        }
    };
    if !generated {
        reporter.info(&format!("{prefix} - file wasn't generated by m2gen"));
        return CleanupOutcome::NotGenerated;
    }

    let outcome = match std::fs::remove_file(&path) {
        Ok(()) => {
            reporter.info(&format!("{prefix} - file was removed"));
            CleanupOutcome::Removed
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            reporter.warning(&format!("{prefix} - file not exist"));
            CleanupOutcome::AlreadyMissing
        }
        Err(e) => {
            reporter.warning(&format!("{prefix} - could not remove: {e}"));
            return CleanupOutcome::RemoveFailed(e.to_string());
        }
    };

    if let Err(e) = state.clear(STATE_KEY) {
        reporter.warning(&format!("could not clear run state: {e}"));
    }
    outcome
}
