//! Current version from the project's own Info.plist

use crate::domain::{ManifestField, ManifestSelector, VersionSourceKind};
use crate::error::SourceError;
use crate::manifest::{read_field, ManifestLocator};
use crate::source::VersionSource;
use tracing::debug;

/// Reads `CFBundleShortVersionString` from the selected Info.plist
pub struct LocalManifestSource<L> {
    locator: L,
}

impl<L: ManifestLocator> LocalManifestSource<L> {
    /// Create a source resolving manifests through `locator`
    pub fn new(locator: L) -> Self {
        Self { locator }
    }
}

impl<L: ManifestLocator> VersionSource for LocalManifestSource<L> {
    fn kind(&self) -> VersionSourceKind {
        VersionSourceKind::Plist
    }

    fn fetch(&self, selector: &ManifestSelector) -> Result<String, SourceError> {
        let location = self.locator.locate(selector)?;
        let version = read_field(&location, ManifestField::Version)?;
        debug!(plist = %location.plist.display(), %version, "current version from plist");
        Ok(version)
    }
}
