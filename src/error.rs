//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Invalid or conflicting options, rejected before any I/O
//! - VersionError: A version string that is not `major.minor.patch`
//! - ManifestError: Issues locating, reading or writing Info.plist / project files
//! - RegistryError: Issues talking to the App Store lookup API
//! - SourceError: Either of the two above, raised while fetching the current version
//!
//! `AppError` folds these into the four outcomes a run can fail with.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::VersionSourceKind;

/// Category of a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid options; nothing was fetched or written
    Configuration,
    /// The current version is not `major.minor.patch`
    InvalidVersionFormat,
    /// The current version could not be obtained
    SourceUnavailable,
    /// The manifest could not be updated
    WriteFailed,
}

impl ErrorKind {
    /// Process exit code for this kind
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::InvalidVersionFormat => 3,
            ErrorKind::SourceUnavailable => 4,
            ErrorKind::WriteFailed => 5,
        }
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Current version could not be parsed or bumped
    #[error("invalid version format: {0}")]
    InvalidVersion(#[from] VersionError),

    /// Current version could not be obtained from the selected source
    #[error("current version unavailable from {kind}: {source}")]
    SourceUnavailable {
        kind: VersionSourceKind,
        #[source]
        source: SourceError,
    },

    /// Manifest could not be located or updated
    #[error("failed to update manifest: {0}")]
    WriteFailed(#[source] ManifestError),
}

impl AppError {
    /// Wrap a source failure
    pub fn source_unavailable(kind: VersionSourceKind, source: impl Into<SourceError>) -> Self {
        AppError::SourceUnavailable {
            kind,
            source: source.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) => ErrorKind::Configuration,
            AppError::InvalidVersion(_) => ErrorKind::InvalidVersionFormat,
            AppError::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            AppError::WriteFailed(_) => ErrorKind::WriteFailed,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// A workspace was given where a project is required
    #[error("please pass the path to the project, not the workspace: {path}")]
    WorkspaceNotSupported { path: PathBuf },

    /// No Xcode project could be found
    #[error("could not find an Xcode project in {dir}")]
    ProjectNotFound { dir: PathBuf },

    /// More than one Xcode project and none chosen
    #[error("found {count} Xcode projects in {dir}; pass --xcodeproj to choose one")]
    AmbiguousProject { dir: PathBuf, count: usize },

    /// Invalid option value
    #[error("invalid value '{value}' for {option}: {message}")]
    InvalidValue {
        option: String,
        value: String,
        message: String,
    },
}

/// Errors related to version strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Not exactly three components
    #[error("'{raw}' has {found} component(s), expected major.minor.patch")]
    WrongComponentCount { raw: String, found: usize },

    /// A component is empty or contains non-digits
    #[error("'{raw}' contains non-numeric component '{component}'")]
    NonNumericComponent { raw: String, component: String },

    /// A component does not fit in 64 bits
    #[error("'{raw}' contains out-of-range component '{component}'")]
    ComponentOutOfRange { raw: String, component: String },

    /// Incrementing a component would overflow
    #[error("cannot bump {component} of {version}: component would overflow")]
    ComponentOverflow {
        version: String,
        component: &'static str,
    },
}

/// Errors related to manifest and project file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest or project file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key absent from the plist
    #[error("key '{key}' not found in {path}")]
    KeyNotFound { path: PathBuf, key: String },

    /// Plist structure not understood
    #[error("failed to parse plist {path}: {message}")]
    PlistParseError { path: PathBuf, message: String },

    /// project.pbxproj structure not understood
    #[error("failed to parse Xcode project {path}: {message}")]
    ProjectParseError { path: PathBuf, message: String },

    /// Named target does not exist
    #[error("target '{target}' not found in {project}")]
    TargetNotFound { project: PathBuf, target: String },

    /// Named build configuration does not exist
    #[error("build configuration '{configuration}' not found for target '{target}' in {project}")]
    ConfigurationNotFound {
        project: PathBuf,
        target: String,
        configuration: String,
    },

    /// Build configuration has no INFOPLIST_FILE
    #[error("no INFOPLIST_FILE set for target '{target}' ({configuration}) in {project}")]
    InfoPlistNotSet {
        project: PathBuf,
        target: String,
        configuration: String,
    },

    /// No target carries the bundle identifier
    #[error("no target with bundle identifier '{bundle_identifier}' found in {dir}")]
    BundleNotFound {
        bundle_identifier: String,
        dir: PathBuf,
    },

    /// Bundle identifier could not be determined for a project target
    #[error("could not determine the bundle identifier for {path}")]
    BundleIdentifierUnknown { path: PathBuf },
}

/// Errors related to the App Store lookup API
#[derive(Error, Debug)]
pub enum RegistryError {
    /// App not found in the store
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Failure to fetch the current version from a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Local manifest could not supply a version
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Remote catalog could not supply a version
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ConfigError {
    /// Creates a new ConflictingOptions error
    pub fn conflicting(message: impl Into<String>) -> Self {
        ConfigError::ConflictingOptions {
            message: message.into(),
        }
    }

    /// Creates a new InvalidPath error
    pub fn invalid_path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidValue error
    pub fn invalid_value(
        option: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            option: option.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError, mapping a missing file to NotFound
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return ManifestError::NotFound { path };
        }
        ManifestError::ReadError { path, source }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new KeyNotFound error
    pub fn key_not_found(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        ManifestError::KeyNotFound {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Creates a new PlistParseError
    pub fn plist_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::PlistParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new ProjectParseError
    pub fn project_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ProjectParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
