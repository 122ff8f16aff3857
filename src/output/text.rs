//! Text output formatter for human-readable display
//!
//! This module provides:
//! - The new version, with the previous one and the bump applied
//! - Bump kind indication (major/minor/patch) with colors
//! - Dry-run and unchanged-file markers

use crate::domain::{BumpKind, VersionIncrementResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, dry_run: bool) -> String {
        if !dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Bump label, colored by severity
    fn bump_label(&self, bump: BumpKind) -> String {
        if !self.color {
            return bump.as_str().to_string();
        }
        match bump {
            BumpKind::Major => bump.as_str().red().bold().to_string(),
            BumpKind::Minor => bump.as_str().yellow().to_string(),
            BumpKind::Patch => bump.as_str().green().to_string(),
        }
    }

    fn highlight(&self, version: &str) -> String {
        if self.color {
            version.green().bold().to_string()
        } else {
            version.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// `1.2.3 → 1.2.4 (patch, from Info.plist)` or `9.9.9 (explicit)`
    fn format_change(&self, result: &VersionIncrementResult) -> String {
        match (&result.previous, result.bump, result.source) {
            (Some(previous), Some(bump), Some(source)) => format!(
                "{} → {} ({}, from {})",
                previous,
                self.highlight(&result.version),
                self.bump_label(bump),
                source.display_name()
            ),
            _ => format!("{} {}", self.highlight(&result.version), self.dim("(explicit)")),
        }
    }

    /// What happened to the manifest
    fn format_manifest_state(&self, result: &VersionIncrementResult) -> String {
        let path = result.manifest.display().to_string();
        if result.dry_run {
            format!("would update {}", path)
        } else if result.written {
            format!("updated {}", path)
        } else {
            format!("{} {}", path, self.dim("(already up to date)"))
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(
        &self,
        result: &VersionIncrementResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        // In quiet mode, only show the version itself
        if self.verbosity == Verbosity::Quiet {
            return writeln!(writer, "{}", result.version);
        }

        writeln!(
            writer,
            "{}{}",
            self.dry_run_prefix(result.dry_run),
            self.format_change(result)
        )?;
        writeln!(writer, "  {}", self.format_manifest_state(result))?;

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "  {}", self.dim(&result.env_line()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_result;

    fn render(formatter: &TextFormatter, result: &VersionIncrementResult) -> String {
        let mut out = Vec::new();
        formatter.format(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn plain(verbosity: Verbosity) -> TextFormatter {
        TextFormatter::with_color(verbosity, false)
    }

    #[test]
    fn test_text_formatter_new() {
        let formatter = TextFormatter::new(Verbosity::Normal);
        assert!(formatter.color);
        assert_eq!(formatter.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_dry_run_prefix() {
        let formatter = plain(Verbosity::Normal);
        assert_eq!(formatter.dry_run_prefix(true), "(dry-run) ");
        assert_eq!(formatter.dry_run_prefix(false), "");
    }

    #[test]
    fn test_format_normal() {
        let output = render(&plain(Verbosity::Normal), &sample_result());
        assert_eq!(
            output,
            "1.2.3 → 1.2.4 (patch, from Info.plist)\n  updated App/Info.plist\n"
        );
    }

    #[test]
    fn test_format_quiet() {
        let output = render(&plain(Verbosity::Quiet), &sample_result());
        assert_eq!(output, "1.2.4\n");
    }

    #[test]
    fn test_format_verbose_includes_env_line() {
        let output = render(&plain(Verbosity::Verbose), &sample_result());
        assert!(output.contains("VERSION_NUMBER=1.2.4"));
    }

    #[test]
    fn test_format_explicit() {
        let result = VersionIncrementResult {
            version: "9.9.9".to_string(),
            previous: None,
            source: None,
            bump: None,
            ..sample_result()
        };
        let output = render(&plain(Verbosity::Normal), &result);
        assert!(output.starts_with("9.9.9 (explicit)\n"));
    }

    #[test]
    fn test_format_dry_run() {
        let result = VersionIncrementResult {
            written: false,
            dry_run: true,
            ..sample_result()
        };
        let output = render(&plain(Verbosity::Normal), &result);
        assert!(output.starts_with("(dry-run) 1.2.3 → 1.2.4"));
        assert!(output.contains("would update App/Info.plist"));
    }

    #[test]
    fn test_format_unchanged() {
        let result = VersionIncrementResult {
            written: false,
            ..sample_result()
        };
        let output = render(&plain(Verbosity::Normal), &result);
        assert!(output.contains("(already up to date)"));
    }

    #[test]
    fn test_bump_label_plain() {
        let formatter = plain(Verbosity::Normal);
        assert_eq!(formatter.bump_label(BumpKind::Major), "major");
        assert_eq!(formatter.bump_label(BumpKind::Minor), "minor");
    }
}
