//! Manifest location, reading and writing
//!
//! This module provides functionality to:
//! - Read the few pbxproj objects needed to find a target's Info.plist
//! - Resolve a manifest selector into an Info.plist location
//! - Read and update Info.plist string values while preserving formatting
//! - Persist a new value atomically (with dry-run support)

mod locator;
mod plist;
mod writer;
pub mod xcodeproj;

pub use locator::{ManifestLocator, XcodeProjectLocator};
pub use plist::InfoPlist;
pub use writer::{write_atomically, ManifestWriter, PlistWriter, WriteOutcome};
pub use xcodeproj::{BuildConfiguration, BuildTarget, XcodeProject};

use crate::domain::{ManifestField, ManifestLocation};
use crate::error::ManifestError;

/// Read a field from the manifest at `location`
pub fn read_field(location: &ManifestLocation, field: ManifestField) -> Result<String, ManifestError> {
    InfoPlist::load(location.path())?.require(field.plist_key())
}
