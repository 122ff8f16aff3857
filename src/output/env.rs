//! Env output formatter: a single `VERSION_NUMBER=<version>` line

use crate::domain::VersionIncrementResult;
use crate::output::OutputFormatter;
use std::io::Write;

/// Formatter printing only the env line, whatever the verbosity
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvFormatter;

impl OutputFormatter for EnvFormatter {
    fn format(
        &self,
        result: &VersionIncrementResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", result.env_line())
    }
}
