//! Selection and location of the manifest that holds the version

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which manifest to operate on
///
/// The two variants are mutually exclusive: a bundle identifier selects the
/// target whose bundle identifier matches, a project selects a target (and
/// build configuration) inside one `.xcodeproj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSelector {
    /// Select by bundle identifier, e.g. `com.example.app`
    ByBundle { bundle_identifier: String },
    /// Select by Xcode project, optionally narrowed to a target and build configuration
    ByProject {
        project: PathBuf,
        target: Option<String>,
        configuration: Option<String>,
    },
}

impl ManifestSelector {
    /// Create a bundle identifier selector
    pub fn by_bundle(bundle_identifier: impl Into<String>) -> Self {
        ManifestSelector::ByBundle {
            bundle_identifier: bundle_identifier.into(),
        }
    }

    /// Create a project selector without target or configuration
    pub fn by_project(project: impl Into<PathBuf>) -> Self {
        ManifestSelector::ByProject {
            project: project.into(),
            target: None,
            configuration: None,
        }
    }

    /// Narrow a project selector to a target; no-op for bundle selectors
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        if let ManifestSelector::ByProject { target, .. } = &mut self {
            *target = Some(name.into());
        }
        self
    }

    /// Narrow a project selector to a build configuration; no-op for bundle selectors
    pub fn with_configuration(mut self, name: impl Into<String>) -> Self {
        if let ManifestSelector::ByProject { configuration, .. } = &mut self {
            *configuration = Some(name.into());
        }
        self
    }

    /// Bundle identifier given directly by the selector, if any
    pub fn bundle_identifier(&self) -> Option<&str> {
        match self {
            ManifestSelector::ByBundle { bundle_identifier } => Some(bundle_identifier),
            ManifestSelector::ByProject { .. } => None,
        }
    }
}

impl fmt::Display for ManifestSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSelector::ByBundle { bundle_identifier } => {
                write!(f, "bundle {}", bundle_identifier)
            }
            ManifestSelector::ByProject {
                project,
                target,
                configuration,
            } => {
                write!(f, "project {}", project.display())?;
                if let Some(target) = target {
                    write!(f, " target {}", target)?;
                }
                if let Some(configuration) = configuration {
                    write!(f, " ({})", configuration)?;
                }
                Ok(())
            }
        }
    }
}

/// Resolved location of an Info.plist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestLocation {
    /// Path to the Info.plist file
    pub plist: PathBuf,
    /// Bundle identifier of the owning target, when it could be determined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_identifier: Option<String>,
    /// Project the plist was resolved from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
}

impl ManifestLocation {
    /// Location of a plist with nothing else known about it
    pub fn new(plist: impl Into<PathBuf>) -> Self {
        Self {
            plist: plist.into(),
            bundle_identifier: None,
            project: None,
        }
    }

    /// Attach a bundle identifier
    pub fn with_bundle_identifier(mut self, bundle_identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(bundle_identifier.into());
        self
    }

    /// Attach the project the plist belongs to
    pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Path to the plist
    pub fn path(&self) -> &Path {
        &self.plist
    }
}

/// Logical manifest fields and their Info.plist keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestField {
    /// Marketing version
    Version,
    /// Bundle identifier
    BundleIdentifier,
}

impl ManifestField {
    /// Info.plist key backing this field
    pub fn plist_key(&self) -> &'static str {
        match self {
            ManifestField::Version => "CFBundleShortVersionString",
            ManifestField::BundleIdentifier => "CFBundleIdentifier",
        }
    }
}

impl fmt::Display for ManifestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plist_key())
    }
}
