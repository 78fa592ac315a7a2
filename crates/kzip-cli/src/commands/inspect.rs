//! Inspect command implementation

use crate::cli::Cli;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use kzip_core::InspectConfig;
use kzip_core::inspect_archive;
use std::process::ExitCode;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    // Build config
    let mut config = InspectConfig::default();
    if let Some(max) = cli.max_size {
        config = config.with_max_archive_size(max);
    }

    // Inspect archive
    let report = add_archive_context(inspect_archive(&cli.archive, &config), &cli.archive)?;

    // Mismatches are findings, not failures, unless strict mode
    let mismatched = report.mismatches().count();
    let message = (mismatched > 0).then(|| {
        format!(
            "{mismatched} of {} files failed checksum verification",
            report.files.len()
        )
    });
    let failure = message.as_deref().filter(|_| cli.strict);

    // Format output; a strict failure is part of the same report
    formatter.format_report(&cli.archive, &report, failure)?;

    match (&message, failure) {
        (_, Some(_)) => Ok(ExitCode::FAILURE),
        (Some(warning), None) => {
            formatter.format_warning(warning);
            Ok(ExitCode::SUCCESS)
        }
        (None, None) => Ok(ExitCode::SUCCESS),
    }
}
