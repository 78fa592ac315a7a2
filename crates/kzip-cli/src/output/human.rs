//! Human-readable output formatter with colors and styling.

use super::describe_issue;
use super::formatter::OutputFormatter;
use super::hex;
use anyhow::Result;
use console::Term;
use console::style;
use kzip_core::ArchiveReport;
use kzip_core::FileReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    utc: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool, utc: bool) -> Self {
        Self {
            verbose,
            quiet,
            utc,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Decimal units, at most two fractional digits, trailing zeros dropped.
    fn format_size(bytes: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

        let mut whole = bytes;
        let mut value = bytes as f64;
        let mut unit = 0;
        while unit < UNITS.len() - 1 && whole >= 1000 {
            value = whole as f64 / 1000.0;
            whole /= 1000;
            unit += 1;
        }

        let fixed = format!("{value:.2}");
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed} {}", UNITS[unit])
    }

    fn format_timestamp(&self, file: &FileReport) -> String {
        if self.utc {
            file.modified_utc()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        } else {
            file.modified_local()
                .format("%Y-%m-%d %H:%M:%S %:z")
                .to_string()
        }
    }

    fn verdict(&self, matches: bool) -> String {
        match (self.use_colors, matches) {
            (true, true) => style("true").green().to_string(),
            (true, false) => style("false").red().bold().to_string(),
            (false, m) => m.to_string(),
        }
    }

    fn file_lines(&self, file: &FileReport) -> Vec<String> {
        let mut lines = vec![
            format!("Offset: {}", file.offset),
            format!("File Name: {}", file.name),
        ];
        if !file.is_root() {
            lines.push(format!("Subdirectory: {}", file.directory));
        }
        lines.push(format!("Timestamp: {}", self.format_timestamp(file)));
        lines.push(format!(
            "CRC32: {} ({}, Calculated {})",
            hex(&file.stored_crc32),
            self.verdict(file.verification.crc32_matches),
            hex(&file.verification.computed_crc32)
        ));
        lines.push(format!(
            "MD5: {} ({}, Calculated {})",
            hex(&file.stored_md5),
            self.verdict(file.verification.md5_matches),
            hex(&file.verification.computed_md5)
        ));
        lines.push(format!("File Size: {}", Self::format_size(file.payload_size)));

        if self.verbose {
            lines.push(format!("TOC Entry: {}", file.index));
            lines.push(format!("Length Field: {}", file.payload_length_field));
        }

        lines
    }

    fn write_report(&self, archive: &Path, report: &ArchiveReport) {
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("Archive: {}", archive.display()));
            let _ = self.term.write_line(&format!(
                "Archive size: {}",
                Self::format_size(report.archive_size)
            ));
        }

        let _ = self.term.write_line("Archive information:");
        let _ = self
            .term
            .write_line(&format!("Archive version: {}", report.header.version));
        let _ = self
            .term
            .write_line(&format!("Compression Mode: {}", report.header.compression));
        let _ = self
            .term
            .write_line(&format!("File Count: {}", report.header.file_count));
        let _ = self.term.write_line("");

        for file in &report.files {
            for line in self.file_lines(file) {
                let _ = self.term.write_line(&line);
            }
            let _ = self.term.write_line("");
        }

        if self.verbose && report.has_layout_issues() {
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Layout issues:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Layout issues:");
            }
            for issue in &report.layout_issues {
                let _ = self
                    .term
                    .write_line(&format!("  - {}", describe_issue(issue)));
            }
            let _ = self.term.write_line("");
        }

        let verified = report.files.iter().filter(|f| f.is_verified()).count();
        let summary = format!(
            "{verified} of {} files verified, {} total",
            report.files.len(),
            Self::format_size(report.total_payload_size())
        );
        if self.use_colors && report.all_verified() {
            let _ = self
                .term
                .write_line(&format!("{} {summary}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(&summary);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_report(
        &self,
        archive: &Path,
        report: &ArchiveReport,
        failure: Option<&str>,
    ) -> Result<()> {
        if !self.quiet {
            self.write_report(archive, report);
        }
        if let Some(message) = failure {
            self.format_error(&anyhow::anyhow!("{message}"));
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:#}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
