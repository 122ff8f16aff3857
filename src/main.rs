//! verbump - Xcode version number increment CLI tool
//!
//! Reads the current marketing version from the project's Info.plist or from
//! the App Store, bumps it, writes it back and publishes it as VERSION_NUMBER.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use verbump::cli::CliArgs;
use verbump::config::{catalog_settings_from_cli, IncrementConfig};
use verbump::engine;
use verbump::error::AppError;
use verbump::logging;
use verbump::manifest::{PlistWriter, XcodeProjectLocator};
use verbump::output::{create_formatter, publish_to_file, OutputConfig, Verbosity};
use verbump::progress::Progress;
use verbump::source::create_source_for;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                eprintln!("Error: {}", app_error);
                ExitCode::from(app_error.exit_code())
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<()> {
    let output_config = OutputConfig::from_cli(args.format, args.verbose, args.quiet, args.no_color);
    if args.no_color {
        colored::control::set_override(false);
    }
    if let Err(e) = logging::init(output_config.verbosity, !args.no_color) {
        eprintln!("Warning: {}", e);
    }

    let config = IncrementConfig::from_cli(&args).map_err(AppError::from)?;
    let catalog = catalog_settings_from_cli(&args).map_err(AppError::from)?;
    tracing::debug!(path = %args.path.display(), dry_run = config.dry_run, "starting");

    let locator = XcodeProjectLocator::new(&args.path);
    let source = create_source_for(&config, locator.clone(), &catalog)
        .map_err(|e| AppError::source_unavailable(config.source, e))?;
    let writer = PlistWriter::new(config.dry_run);

    let mut progress = Progress::new(output_config.verbosity != Verbosity::Quiet);
    if config.source.is_remote() && config.explicit_version.is_none() {
        progress.spinner(&format!("Querying the {}...", config.source.display_name()));
    }
    let result = engine::run(&config, source.as_ref(), &locator, &writer);
    progress.finish_and_clear();
    let result = result?;

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if let Some(path) = &args.output_file {
        publish_to_file(path, &result)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
