//! Sources of the current version
//!
//! This module provides:
//! - VersionSource trait consumed by the engine
//! - Local manifest source (Info.plist)
//! - Remote catalog source (App Store)

mod catalog;
mod local;

pub use catalog::RemoteCatalogSource;
pub use local::LocalManifestSource;

use crate::config::IncrementConfig;
use crate::domain::{ManifestSelector, VersionSourceKind};
use crate::error::{RegistryError, SourceError};
use crate::manifest::ManifestLocator;
use crate::registry::{AppStoreAdapter, HttpClient, DEFAULT_TIMEOUT};
use std::time::Duration;
use tracing::debug;

/// Trait for supplying the current version string
pub trait VersionSource {
    /// Which kind of source this is
    fn kind(&self) -> VersionSourceKind;

    /// Fetch the current version for the selected manifest
    fn fetch(&self, selector: &ManifestSelector) -> Result<String, SourceError>;
}

/// Settings for the remote catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Storefront country code
    pub country: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// HTTP re-sends on transient failures
    pub retries: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            country: None,
            timeout: DEFAULT_TIMEOUT,
            retries: 0,
        }
    }
}

/// Create the version source for the given kind
pub fn create_source<L>(
    kind: VersionSourceKind,
    locator: L,
    settings: &CatalogSettings,
) -> Result<Box<dyn VersionSource>, RegistryError>
where
    L: ManifestLocator + 'static,
{
    match kind {
        VersionSourceKind::Plist => Ok(Box::new(LocalManifestSource::new(locator))),
        VersionSourceKind::AppStore => {
            let client = HttpClient::with_timeout(settings.timeout)?.with_max_retries(settings.retries);
            let mut adapter = AppStoreAdapter::new(client);
            if let Some(country) = &settings.country {
                adapter = adapter.with_country(country);
            }
            Ok(Box::new(RemoteCatalogSource::new(Box::new(adapter), locator)))
        }
    }
}

/// Create the version source a run needs
///
/// An explicit version is never looked up, so no HTTP client is built for
/// it; the local source stands in and is not fetched.
pub fn create_source_for<L>(
    config: &IncrementConfig,
    locator: L,
    settings: &CatalogSettings,
) -> Result<Box<dyn VersionSource>, RegistryError>
where
    L: ManifestLocator + 'static,
{
    if config.explicit_version.is_some() && config.source.is_remote() {
        debug!(source = %config.source, "explicit version given, catalog not contacted");
        return create_source(VersionSourceKind::Plist, locator, settings);
    }
    create_source(config.source, locator, settings)
}
