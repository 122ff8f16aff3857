//! Output formatting for increment results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Env output (`VERSION_NUMBER=<version>`) for shell pipelines
//! - Publishing the version to an output file for later pipeline steps

mod env;
mod json;
mod text;

pub use env::EnvFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::VersionIncrementResult;
use clap::ValueEnum;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
    /// `VERSION_NUMBER=<version>` only
    Env,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json, env)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI flags
    pub fn from_cli(format: OutputFormat, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: !no_color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the result of one run
    fn format(&self, result: &VersionIncrementResult, writer: &mut dyn Write)
        -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
        OutputFormat::Env => Box::new(EnvFormatter),
    }
}

/// Append `VERSION_NUMBER=<version>` to `path`, creating it if needed
pub fn publish_to_file(path: &Path, result: &VersionIncrementResult) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", result.env_line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    pub(super) fn sample_result() -> VersionIncrementResult {
        VersionIncrementResult {
            version: "1.2.4".to_string(),
            previous: Some("1.2.3".to_string()),
            source: Some(crate::domain::VersionSourceKind::Plist),
            bump: Some(crate::domain::BumpKind::Patch),
            manifest: PathBuf::from("App/Info.plist"),
            written: true,
            dry_run: false,
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli() {
        let config = OutputConfig::from_cli(OutputFormat::Json, true, false, true);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert!(!config.color);

        let config = OutputConfig::from_cli(OutputFormat::Text, false, true, false);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert!(config.color);
    }

    #[test]
    fn test_create_formatter_env() {
        let formatter = create_formatter(OutputConfig::new(OutputFormat::Env, Verbosity::Normal));
        let mut out = Vec::new();
        formatter.format(&sample_result(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "VERSION_NUMBER=1.2.4\n");
    }

    #[test]
    fn test_publish_to_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        fs::write(&path, "EXISTING=1\n").unwrap();

        publish_to_file(&path, &sample_result()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "EXISTING=1\nVERSION_NUMBER=1.2.4\n"
        );
    }

    #[test]
    fn test_publish_to_file_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.env");

        publish_to_file(&path, &sample_result()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "VERSION_NUMBER=1.2.4\n");
    }
}
