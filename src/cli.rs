//! CLI argument parsing module for verbump

use crate::domain::{BumpKind, VersionSourceKind};
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout given in whole seconds
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Bump the version number in an Xcode project's Info.plist
#[derive(Parser, Debug, Clone)]
#[command(
    name = "verbump",
    version,
    about = "Increment the version number of your Xcode project"
)]
pub struct CliArgs {
    /// Directory containing the Xcode project (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Version options
    /// The type of this version bump
    #[arg(short, long, value_enum, default_value_t = BumpKind::Patch, env = "VERBUMP_BUMP_TYPE")]
    pub bump: BumpKind,

    /// Change to a specific version; replaces the bump type
    #[arg(long, env = "VERBUMP_VERSION_NUMBER")]
    pub version_number: Option<String>,

    /// Where to read the version being incremented
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = VersionSourceKind::Plist,
        env = "VERBUMP_VERSION_SOURCE"
    )]
    pub source: VersionSourceKind,

    // Manifest selection
    /// Bundle identifier of the application
    #[arg(long, env = "VERBUMP_BUNDLE_ID")]
    pub bundle_id: Option<String>,

    /// Path to the Xcode project, if it is not the only one in PATH
    #[arg(long, env = "VERBUMP_PROJECT")]
    pub xcodeproj: Option<PathBuf>,

    /// Target to use if the project has several
    #[arg(long, env = "VERBUMP_TARGET")]
    pub target: Option<String>,

    /// Build configuration whose Info.plist should be updated
    #[arg(long, env = "VERBUMP_BUILD_CONFIGURATION")]
    pub configuration: Option<String>,

    // App Store options
    /// App Store storefront country code used for the lookup
    #[arg(long, env = "VERBUMP_APPSTORE_COUNTRY")]
    pub country: Option<String>,

    /// App Store request timeout in seconds
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Re-send the App Store request this many times on transient failures (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub catalog_retries: u32,

    // General options
    /// Dry run mode - show the new version without writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Append VERSION_NUMBER=<version> to this file for later pipeline steps
    #[arg(long, env = "VERBUMP_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Check if any project-based selector is given
    pub fn has_project_selector(&self) -> bool {
        self.xcodeproj.is_some() || self.target.is_some() || self.configuration.is_some()
    }

    /// Explicit version, if given and non-empty
    pub fn explicit_version(&self) -> Option<&str> {
        self.version_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
