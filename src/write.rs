//! Output port: persisting rendered units.
//!
//! The driver depends on [`SourceWriter`] as an injectable capability,
//! so tests can run generation against an in-memory fake without real
//! file I/O.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::render::RenderedUnit;

/// Result of attempting to persist one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The unit was persisted.
    Written,

    /// No generated-source root is configured. The driver downgrades
    /// this to a per-entity warning rather than a hard failure.
    Unavailable,
}

/// A unit could not be persisted (permissions, disk, ...).
#[derive(Debug, Error)]
#[error("failed to write `{unit}`")]
pub struct WriteError {
    /// Unit name of the failing output.
    pub unit: String,
    pub source: io::Error,
}

/// Destination for rendered units.
pub trait SourceWriter {
    /// Persist one unit.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] on I/O failure. A missing output
    /// location is not an error; it is reported as
    /// [`WriteOutcome::Unavailable`].
    fn write(&mut self, unit: &RenderedUnit) -> Result<WriteOutcome, WriteError>;
}

/// Writes units under `<root>/<package>/<file_name>`.
///
/// Existing files are overwritten: every round is a full regeneration,
/// not an incremental diff.
#[derive(Debug, Clone)]
pub struct FsSourceWriter {
    root: Option<PathBuf>,
}

impl FsSourceWriter {
    /// Write under an explicit generated-source root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Resolve the generated-source root from the `OUT_DIR` build
    /// variable.
    ///
    /// When the variable is unset (the generator is running outside a
    /// build script), the writer reports every unit as
    /// [`WriteOutcome::Unavailable`] instead of failing hard.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var_os("OUT_DIR").map(PathBuf::from),
        }
    }

    /// A writer with no configured root; every write reports
    /// [`WriteOutcome::Unavailable`].
    pub fn unconfigured() -> Self {
        Self { root: None }
    }

    /// The configured generated-source root, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}

impl SourceWriter for FsSourceWriter {
    fn write(&mut self, unit: &RenderedUnit) -> Result<WriteOutcome, WriteError> {
        let Some(root) = &self.root else {
            return Ok(WriteOutcome::Unavailable);
        };

        let dir = root.join(&unit.package);
        fs::create_dir_all(&dir).map_err(|source| WriteError {
            unit: unit.unit_name.clone(),
            source,
        })?;

        fs::write(dir.join(&unit.file_name), &unit.text).map_err(|source| WriteError {
            unit: unit.unit_name.clone(),
            source,
        })?;

        Ok(WriteOutcome::Written)
    }
}

/// Records units in memory instead of writing files.
///
/// Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    /// Units in write order.
    pub units: Vec<RenderedUnit>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a recorded unit by name.
    pub fn unit(&self, unit_name: &str) -> Option<&RenderedUnit> {
        self.units.iter().find(|u| u.unit_name == unit_name)
    }
}

impl SourceWriter for MemoryWriter {
    fn write(&mut self, unit: &RenderedUnit) -> Result<WriteOutcome, WriteError> {
        self.units.push(unit.clone());
        Ok(WriteOutcome::Written)
    }
}
