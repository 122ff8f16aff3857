//! Validated configuration for a single run
//!
//! Everything that can be checked without touching a version source or a
//! manifest is checked here, so that a bad invocation fails before any
//! fetch or write happens.

use crate::cli::CliArgs;
use crate::domain::{BumpKind, ManifestSelector, VersionSourceKind};
use crate::error::ConfigError;
use crate::manifest::xcodeproj::{find_projects, is_workspace, PBXPROJ_FILE, PROJECT_EXTENSION};
use crate::source::CatalogSettings;
use std::path::Path;
use tracing::debug;

/// Configuration consumed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementConfig {
    /// Bump applied to the current version
    pub bump: BumpKind,
    /// Version to write instead of computing one
    pub explicit_version: Option<String>,
    /// Where the current version comes from
    pub source: VersionSourceKind,
    /// Which manifest to read and write
    pub selector: ManifestSelector,
    /// Compute and report without writing
    pub dry_run: bool,
}

impl IncrementConfig {
    /// Create a configuration bumping the selected manifest's own version
    pub fn new(selector: ManifestSelector) -> Self {
        Self {
            bump: BumpKind::default(),
            explicit_version: None,
            source: VersionSourceKind::default(),
            selector,
            dry_run: false,
        }
    }

    /// Set the bump kind
    pub fn with_bump(mut self, bump: BumpKind) -> Self {
        self.bump = bump;
        self
    }

    /// Set the source kind
    pub fn with_source(mut self, source: VersionSourceKind) -> Self {
        self.source = source;
        self
    }

    /// Set an explicit version; empty strings are ignored
    pub fn with_explicit_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.explicit_version = if version.trim().is_empty() {
            None
        } else {
            Some(version.trim().to_string())
        };
        self
    }

    /// Enable or disable dry-run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate CLI arguments and build the configuration
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.verbose && args.quiet {
            return Err(ConfigError::conflicting(
                "--quiet and --verbose cannot be used together",
            ));
        }

        let selector = selector_from_cli(args)?;
        debug!(%selector, "manifest selector");

        let mut config = Self::new(selector)
            .with_bump(args.bump)
            .with_source(args.source)
            .with_dry_run(args.dry_run);
        if let Some(version) = args.explicit_version() {
            config = config.with_explicit_version(version);
        }

        Ok(config)
    }
}

/// Catalog settings from CLI arguments
pub fn catalog_settings_from_cli(args: &CliArgs) -> Result<CatalogSettings, ConfigError> {
    let country = match args.country.as_deref().map(str::trim) {
        Some(cc) if cc.len() == 2 && cc.chars().all(|c| c.is_ascii_alphabetic()) => {
            Some(cc.to_ascii_lowercase())
        }
        Some(cc) => {
            return Err(ConfigError::invalid_value(
                "--country",
                cc,
                "expected a two-letter country code",
            ))
        }
        None => None,
    };

    let defaults = CatalogSettings::default();
    Ok(CatalogSettings {
        country,
        timeout: args.timeout.unwrap_or(defaults.timeout),
        retries: args.catalog_retries,
    })
}

fn selector_from_cli(args: &CliArgs) -> Result<ManifestSelector, ConfigError> {
    if let Some(bundle_id) = &args.bundle_id {
        if args.has_project_selector() {
            return Err(ConfigError::conflicting(
                "--bundle-id cannot be combined with --xcodeproj, --target or --configuration",
            ));
        }
        let bundle_id = bundle_id.trim();
        if bundle_id.is_empty() {
            return Err(ConfigError::invalid_value(
                "--bundle-id",
                bundle_id,
                "bundle identifier must not be empty",
            ));
        }
        return Ok(ManifestSelector::by_bundle(bundle_id));
    }

    let project = match &args.xcodeproj {
        Some(project) => {
            validate_project_path(project)?;
            project.clone()
        }
        None => discover_project(&args.path)?,
    };

    let mut selector = ManifestSelector::by_project(project);
    if let Some(target) = &args.target {
        selector = selector.with_target(target);
    }
    if let Some(configuration) = &args.configuration {
        selector = selector.with_configuration(configuration);
    }
    Ok(selector)
}

/// Accept only an existing `.xcodeproj` bundle holding a `project.pbxproj`
fn validate_project_path(project: &Path) -> Result<(), ConfigError> {
    if is_workspace(project) {
        return Err(ConfigError::WorkspaceNotSupported {
            path: project.to_path_buf(),
        });
    }
    if !project.exists() {
        return Err(ConfigError::invalid_path(
            project,
            "could not find Xcode project at this path",
        ));
    }
    let is_project_bundle = project.is_dir()
        && project.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION)
        && project.join(PBXPROJ_FILE).is_file();
    if !is_project_bundle {
        return Err(ConfigError::invalid_path(project, "not an Xcode project"));
    }
    Ok(())
}

/// The only `.xcodeproj` directly inside `dir`
fn discover_project(dir: &Path) -> Result<std::path::PathBuf, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::invalid_path(dir, "not a directory"));
    }

    let mut projects =
        find_projects(dir).map_err(|e| ConfigError::invalid_path(dir, e.to_string()))?;
    match projects.len() {
        0 => Err(ConfigError::ProjectNotFound {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(projects.remove(0)),
        count => Err(ConfigError::AmbiguousProject {
            dir: dir.to_path_buf(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["verbump"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    fn project_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("App.xcodeproj");
        fs::create_dir(&project).unwrap();
        fs::write(project.join(PBXPROJ_FILE), "// !$*UTF8*$!\n{\n}\n").unwrap();
        (dir, project)
    }

    #[test]
    fn test_builder_defaults() {
        let config = IncrementConfig::new(ManifestSelector::by_bundle("com.example.app"));
        assert_eq!(config.bump, BumpKind::Patch);
        assert_eq!(config.source, VersionSourceKind::Plist);
        assert_eq!(config.explicit_version, None);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_builder_ignores_empty_explicit_version() {
        let config = IncrementConfig::new(ManifestSelector::by_bundle("com.example.app"))
            .with_explicit_version("");
        assert_eq!(config.explicit_version, None);

        let config = IncrementConfig::new(ManifestSelector::by_bundle("com.example.app"))
            .with_explicit_version(" 9.9.9 ");
        assert_eq!(config.explicit_version.as_deref(), Some("9.9.9"));
    }

    #[test]
    fn test_from_cli_bundle_selector() {
        let config = IncrementConfig::from_cli(&args(&[
            "--bundle-id",
            "com.example.app",
            "-b",
            "major",
            "-s",
            "appstore",
        ]))
        .unwrap();
        assert_eq!(config.selector, ManifestSelector::by_bundle("com.example.app"));
        assert_eq!(config.bump, BumpKind::Major);
        assert_eq!(config.source, VersionSourceKind::AppStore);
    }

    #[test]
    fn test_from_cli_bundle_and_project_conflict() {
        let (_dir, project) = project_dir();
        let err = IncrementConfig::from_cli(&args(&[
            "--bundle-id",
            "com.example.app",
            "--xcodeproj",
            project.to_str().unwrap(),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_from_cli_bundle_and_target_conflict() {
        let err = IncrementConfig::from_cli(&args(&[
            "--bundle-id",
            "com.example.app",
            "--target",
            "App",
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_from_cli_empty_bundle_id() {
        let err = IncrementConfig::from_cli(&args(&["--bundle-id", " "])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_cli_explicit_project() {
        let (_dir, project) = project_dir();
        let config = IncrementConfig::from_cli(&args(&[
            "--xcodeproj",
            project.to_str().unwrap(),
            "--target",
            "App",
            "--configuration",
            "Release",
            "--version-number",
            "3.0.0",
            "-n",
        ]))
        .unwrap();
        assert_eq!(
            config.selector,
            ManifestSelector::by_project(&project)
                .with_target("App")
                .with_configuration("Release")
        );
        assert_eq!(config.explicit_version.as_deref(), Some("3.0.0"));
        assert!(config.dry_run);
    }

    #[test]
    fn test_from_cli_rejects_workspace() {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().join("App.xcworkspace");
        fs::create_dir(&workspace).unwrap();

        let err = IncrementConfig::from_cli(&args(&["--xcodeproj", workspace.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::WorkspaceNotSupported { .. }));
    }

    #[test]
    fn test_from_cli_rejects_missing_project() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Missing.xcodeproj");

        let err = IncrementConfig::from_cli(&args(&["--xcodeproj", missing.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_from_cli_rejects_regular_file() {
        let dir = TempDir::new().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "# App\n").unwrap();

        let err = IncrementConfig::from_cli(&args(&["--xcodeproj", readme.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_from_cli_rejects_directory_without_project_extension() {
        let dir = TempDir::new().unwrap();
        let sources = dir.path().join("Sources");
        fs::create_dir(&sources).unwrap();
        fs::write(sources.join(PBXPROJ_FILE), "{}").unwrap();

        let err = IncrementConfig::from_cli(&args(&["--xcodeproj", sources.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_from_cli_rejects_project_without_pbxproj() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("Empty.xcodeproj");
        fs::create_dir(&project).unwrap();

        let err = IncrementConfig::from_cli(&args(&["--xcodeproj", project.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_from_cli_discovers_single_project() {
        let (dir, project) = project_dir();
        let config = IncrementConfig::from_cli(&args(&[dir.path().to_str().unwrap()])).unwrap();
        assert_eq!(config.selector, ManifestSelector::by_project(project));
    }

    #[test]
    fn test_from_cli_no_project() {
        let dir = TempDir::new().unwrap();
        let err = IncrementConfig::from_cli(&args(&[dir.path().to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::ProjectNotFound { .. }));
    }

    #[test]
    fn test_from_cli_ambiguous_project() {
        let (dir, _) = project_dir();
        fs::create_dir(dir.path().join("Other.xcodeproj")).unwrap();
        let err = IncrementConfig::from_cli(&args(&[dir.path().to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousProject { count: 2, .. }));
    }

    #[test]
    fn test_from_cli_verbose_and_quiet_conflict() {
        let err = IncrementConfig::from_cli(&args(&[
            "--bundle-id",
            "com.example.app",
            "--verbose",
            "-q",
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_catalog_settings() {
        let settings = catalog_settings_from_cli(&args(&[
            "--country",
            "DE",
            "--timeout",
            "5",
            "--catalog-retries",
            "2",
        ]))
        .unwrap();
        assert_eq!(settings.country.as_deref(), Some("de"));
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.retries, 2);

        let settings = catalog_settings_from_cli(&args(&[])).unwrap();
        assert_eq!(settings, CatalogSettings::default());
    }

    #[test]
    fn test_catalog_settings_invalid_country() {
        let err = catalog_settings_from_cli(&args(&["--country", "germany"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
