//! JSON output formatter for machine processing

use crate::domain::{VersionIncrementResult, VERSION_NUMBER};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode prints a compact single line
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Name the version is published under
    name: &'static str,
    #[serde(flatten)]
    result: &'a VersionIncrementResult,
}

impl OutputFormatter for JsonFormatter {
    fn format(
        &self,
        result: &VersionIncrementResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            name: VERSION_NUMBER,
            result,
        };
        let json = if self.verbosity == Verbosity::Quiet {
            serde_json::to_string(&output)
        } else {
            serde_json::to_string_pretty(&output)
        }
        .map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;
        Ok(())
    }
}
