//! Resolution of a manifest selector into an Info.plist location

use crate::domain::{ManifestField, ManifestLocation, ManifestSelector};
use crate::error::ManifestError;
use crate::manifest::plist::InfoPlist;
use crate::manifest::xcodeproj::{find_projects, has_variable, BuildTarget, XcodeProject};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for resolving where a selector's version lives
pub trait ManifestLocator {
    /// Resolve the selector into a concrete Info.plist location
    fn locate(&self, selector: &ManifestSelector) -> Result<ManifestLocation, ManifestError>;
}

/// Locator backed by Xcode project files
///
/// Project selectors are resolved through the target's `INFOPLIST_FILE`
/// build setting. Bundle selectors search every `.xcodeproj` directly inside
/// the search root for a target whose bundle identifier matches.
#[derive(Debug, Clone)]
pub struct XcodeProjectLocator {
    search_root: PathBuf,
}

impl XcodeProjectLocator {
    /// Create a locator searching `search_root` for bundle selectors
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: search_root.into(),
        }
    }

    fn locate_in_project(
        &self,
        project_path: &Path,
        target: Option<&str>,
        configuration: Option<&str>,
    ) -> Result<ManifestLocation, ManifestError> {
        let project = XcodeProject::open(project_path)?;

        let build_target = match target {
            Some(name) => project
                .target(name)
                .ok_or_else(|| ManifestError::TargetNotFound {
                    project: project_path.to_path_buf(),
                    target: name.to_string(),
                })?,
            None => project.targets().into_iter().next().ok_or_else(|| {
                ManifestError::project_parse_error(project_path, "project has no native targets")
            })?,
        };

        location_for(&project, &build_target, configuration)
    }

    fn locate_by_bundle(&self, bundle_identifier: &str) -> Result<ManifestLocation, ManifestError> {
        let projects = find_projects(&self.search_root)
            .map_err(|e| ManifestError::read_error(&self.search_root, e))?;

        for project_path in projects {
            let project = match XcodeProject::open(&project_path) {
                Ok(project) => project,
                Err(e) => {
                    debug!(project = %project_path.display(), error = %e, "skipping unreadable project");
                    continue;
                }
            };

            for target in project.targets() {
                for configuration in &target.configurations {
                    let Ok(location) = location_for(&project, &target, Some(&configuration.name))
                    else {
                        continue;
                    };
                    if location.bundle_identifier.as_deref() == Some(bundle_identifier) {
                        return Ok(location);
                    }
                }
            }
        }

        Err(ManifestError::BundleNotFound {
            bundle_identifier: bundle_identifier.to_string(),
            dir: self.search_root.clone(),
        })
    }
}

impl ManifestLocator for XcodeProjectLocator {
    fn locate(&self, selector: &ManifestSelector) -> Result<ManifestLocation, ManifestError> {
        let location = match selector {
            ManifestSelector::ByProject {
                project,
                target,
                configuration,
            } => self.locate_in_project(project, target.as_deref(), configuration.as_deref())?,
            ManifestSelector::ByBundle { bundle_identifier } => {
                self.locate_by_bundle(bundle_identifier)?
            }
        };

        debug!(
            selector = %selector,
            plist = %location.plist.display(),
            bundle = location.bundle_identifier.as_deref().unwrap_or("-"),
            "resolved manifest location"
        );
        Ok(location)
    }
}

/// Location of a target's Info.plist for one build configuration
fn location_for(
    project: &XcodeProject,
    target: &BuildTarget,
    configuration: Option<&str>,
) -> Result<ManifestLocation, ManifestError> {
    let config = target
        .configuration(configuration)
        .ok_or_else(|| ManifestError::ConfigurationNotFound {
            project: project.path().to_path_buf(),
            target: target.name.clone(),
            configuration: configuration.unwrap_or("<default>").to_string(),
        })?;

    let info_plist = config
        .info_plist()
        .ok_or_else(|| ManifestError::InfoPlistNotSet {
            project: project.path().to_path_buf(),
            target: target.name.clone(),
            configuration: config.name.clone(),
        })?;

    let plist_path = project.resolve_path(info_plist);
    let mut location = ManifestLocation::new(&plist_path).with_project(project.path());

    // Build setting first, then the literal value in the plist itself
    let bundle_identifier = config.bundle_identifier().map(str::to_string).or_else(|| {
        InfoPlist::load(&plist_path)
            .ok()
            .and_then(|plist| plist.get(ManifestField::BundleIdentifier.plist_key()))
            .filter(|id| !id.is_empty() && !has_variable(id))
    });
    if let Some(bundle_identifier) = bundle_identifier {
        location = location.with_bundle_identifier(bundle_identifier);
    }

    Ok(location)
}
