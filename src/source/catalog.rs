//! Current version from a remote catalog

use crate::domain::{ManifestSelector, VersionSourceKind};
use crate::error::{ManifestError, SourceError};
use crate::manifest::ManifestLocator;
use crate::registry::RegistryAdapter;
use crate::source::VersionSource;
use tracing::debug;

/// Asks a registry for the version published under the selector's bundle identifier
///
/// For project selectors the bundle identifier is taken from the resolved
/// manifest location.
pub struct RemoteCatalogSource<L> {
    registry: Box<dyn RegistryAdapter>,
    locator: L,
}

impl<L: ManifestLocator> RemoteCatalogSource<L> {
    /// Create a source querying `registry`
    pub fn new(registry: Box<dyn RegistryAdapter>, locator: L) -> Self {
        Self { registry, locator }
    }

    fn bundle_identifier(&self, selector: &ManifestSelector) -> Result<String, ManifestError> {
        if let Some(bundle_identifier) = selector.bundle_identifier() {
            return Ok(bundle_identifier.to_string());
        }

        let location = self.locator.locate(selector)?;
        location
            .bundle_identifier
            .ok_or(ManifestError::BundleIdentifierUnknown {
                path: location.plist,
            })
    }
}

impl<L: ManifestLocator> VersionSource for RemoteCatalogSource<L> {
    fn kind(&self) -> VersionSourceKind {
        VersionSourceKind::AppStore
    }

    fn fetch(&self, selector: &ManifestSelector) -> Result<String, SourceError> {
        let bundle_identifier = self.bundle_identifier(selector)?;
        debug!(
            bundle = %bundle_identifier,
            registry = self.registry.registry_name(),
            "looking up published version"
        );
        Ok(self.registry.fetch_version(&bundle_identifier)?)
    }
}
