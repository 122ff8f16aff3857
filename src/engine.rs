//! Version increment workflow
//!
//! resolve current version → bump (or take the explicit version) → locate →
//! write. The source, locator and writer are passed in so that every step
//! can be swapped out, and nothing is written unless a new version was
//! determined.

use crate::config::IncrementConfig;
use crate::domain::{ManifestField, SemanticVersion, VersionIncrementResult};
use crate::error::AppError;
use crate::manifest::{ManifestLocator, ManifestWriter, WriteOutcome};
use crate::source::VersionSource;
use tracing::{debug, info};

/// The version to write, and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    version: String,
    previous: Option<String>,
}

/// Run one increment
///
/// Fails with `SourceUnavailable` if the source cannot supply a version,
/// `InvalidVersion` if that version is not `major.minor.patch`, and
/// `WriteFailed` if the manifest cannot be located or updated. The manifest
/// is never touched in the first two cases.
pub fn run(
    config: &IncrementConfig,
    source: &dyn VersionSource,
    locator: &dyn ManifestLocator,
    writer: &dyn ManifestWriter,
) -> Result<VersionIncrementResult, AppError> {
    let resolved = resolve_version(config, source)?;

    let location = locator
        .locate(&config.selector)
        .map_err(AppError::WriteFailed)?;
    debug!(plist = %location.plist.display(), "manifest located");

    let outcome = writer
        .write(&location, ManifestField::Version, &resolved.version)
        .map_err(AppError::WriteFailed)?;

    match outcome {
        WriteOutcome::Written => info!(version = %resolved.version, "version updated"),
        WriteOutcome::Unchanged => info!(version = %resolved.version, "version already current"),
        WriteOutcome::Skipped => info!(version = %resolved.version, "dry-run: version not written"),
    }

    let explicit = resolved.previous.is_none();
    Ok(VersionIncrementResult {
        version: resolved.version,
        previous: resolved.previous,
        source: (!explicit).then_some(config.source),
        bump: (!explicit).then_some(config.bump),
        manifest: location.plist,
        written: outcome.file_modified(),
        dry_run: config.dry_run,
    })
}

fn resolve_version(
    config: &IncrementConfig,
    source: &dyn VersionSource,
) -> Result<Resolved, AppError> {
    if let Some(explicit) = &config.explicit_version {
        info!(version = %explicit, "using explicit version");
        return Ok(Resolved {
            version: explicit.clone(),
            previous: None,
        });
    }

    let current = source
        .fetch(&config.selector)
        .map_err(|e| AppError::source_unavailable(source.kind(), e))?;
    info!(source = %source.kind(), current = %current, "current version");

    let next = SemanticVersion::parse(&current)?.bump(config.bump)?;
    Ok(Resolved {
        version: next.to_string(),
        previous: Some(current),
    })
}
