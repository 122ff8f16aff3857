//! Manifest file writing
//!
//! This module provides:
//! - ManifestWriter trait for persisting a single manifest field
//! - PlistWriter, the Info.plist implementation
//! - Dry-run mode support (no actual file modifications)
//! - Atomic replacement through a temp file in the same directory

use crate::domain::{ManifestField, ManifestLocation};
use crate::error::ManifestError;
use crate::manifest::plist::InfoPlist;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Outcome of a manifest write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was rewritten with the new value
    Written,
    /// The file already held the value; nothing was written
    Unchanged,
    /// Dry-run: the file would have been rewritten
    Skipped,
}

impl WriteOutcome {
    /// Returns true if the file on disk was modified
    pub fn file_modified(&self) -> bool {
        matches!(self, WriteOutcome::Written)
    }
}

/// Trait for persisting a value into a manifest
pub trait ManifestWriter {
    /// Set `field` to `value` in the manifest at `location`
    ///
    /// Writing the value a manifest already holds leaves it untouched.
    fn write(
        &self,
        location: &ManifestLocation,
        field: ManifestField,
        value: &str,
    ) -> Result<WriteOutcome, ManifestError>;
}

/// Writer for Info.plist files
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl PlistWriter {
    /// Create a new PlistWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a PlistWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl ManifestWriter for PlistWriter {
    fn write(
        &self,
        location: &ManifestLocation,
        field: ManifestField,
        value: &str,
    ) -> Result<WriteOutcome, ManifestError> {
        let path = location.path();
        let mut plist = InfoPlist::load(path)?;

        if !plist.set(field.plist_key(), value)? {
            debug!(plist = %path.display(), %field, value, "value already present");
            return Ok(WriteOutcome::Unchanged);
        }

        if self.dry_run {
            info!(plist = %path.display(), %field, value, "dry-run: not writing");
            return Ok(WriteOutcome::Skipped);
        }

        write_atomically(path, plist.content())?;
        info!(plist = %path.display(), %field, value, "manifest updated");
        Ok(WriteOutcome::Written)
    }
}

/// Replace a file's content atomically
///
/// The content is written to a temp file next to `path` and renamed over
/// it, so readers observe either the old or the new file. The original
/// permissions are kept.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), ManifestError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
        .map_err(|e| ManifestError::read_error(path, e))?
        .permissions();

    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| ManifestError::write_error(path, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ManifestError::write_error(path, e))?;
    temp.as_file()
        .set_permissions(permissions)
        .map_err(|e| ManifestError::write_error(path, e))?;
    temp.persist(path)
        .map_err(|e| ManifestError::write_error(path, e.error))?;

    Ok(())
}
