//! JSON output formatter for machine-readable results.

use super::describe_issue;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::hex;
use super::issue_kind;
use anyhow::Result;
use kzip_core::ArchiveReport;
use kzip_core::FileReport;
use kzip_core::LayoutIssue;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter {
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    archive: String,
    archive_size: u64,
    version: String,
    compression: String,
    file_count: u16,
    total_payload_size: u64,
    all_verified: bool,
    files: Vec<FileOutput>,
    layout_issues: Vec<IssueOutput>,
}

#[derive(Debug, Serialize)]
struct FileOutput {
    index: usize,
    offset: u64,
    name: String,
    directory: String,
    timestamp: u32,
    modified: String,
    payload_length_field: u64,
    size: u64,
    crc32: ChecksumOutput,
    md5: ChecksumOutput,
}

#[derive(Debug, Serialize)]
struct ChecksumOutput {
    stored: String,
    calculated: String,
    matches: bool,
}

#[derive(Debug, Serialize)]
struct IssueOutput {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    message: String,
}

impl From<&FileReport> for FileOutput {
    fn from(file: &FileReport) -> Self {
        Self {
            index: file.index,
            offset: file.offset,
            name: file.name.clone(),
            directory: file.directory.clone(),
            timestamp: file.timestamp,
            modified: file.modified_utc().to_rfc3339(),
            payload_length_field: file.payload_length_field,
            size: file.payload_size,
            crc32: ChecksumOutput {
                stored: hex(&file.stored_crc32),
                calculated: hex(&file.verification.computed_crc32),
                matches: file.verification.crc32_matches,
            },
            md5: ChecksumOutput {
                stored: hex(&file.stored_md5),
                calculated: hex(&file.verification.computed_md5),
                matches: file.verification.md5_matches,
            },
        }
    }
}

impl From<&LayoutIssue> for IssueOutput {
    fn from(issue: &LayoutIssue) -> Self {
        Self {
            kind: issue_kind(issue),
            index: issue.index(),
            message: describe_issue(issue),
        }
    }
}

impl ReportOutput {
    fn new(archive: &Path, report: &ArchiveReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            archive_size: report.archive_size,
            version: report.header.version.to_string(),
            compression: report.header.compression.to_string(),
            file_count: report.header.file_count,
            total_payload_size: report.total_payload_size(),
            all_verified: report.all_verified(),
            files: report.files.iter().map(FileOutput::from).collect(),
            layout_issues: report.layout_issues.iter().map(IssueOutput::from).collect(),
        }
    }
}

impl JsonFormatter {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(
        &self,
        archive: &Path,
        report: &ArchiveReport,
        failure: Option<&str>,
    ) -> Result<()> {
        let data = (!self.quiet).then(|| ReportOutput::new(archive, report));
        match failure {
            Some(message) => Self::output(&JsonOutput::failure("inspect", data, message)),
            None => match data {
                Some(data) => Self::output(&JsonOutput::success("inspect", data)),
                None => Ok(()),
            },
        }
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("inspect", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        // Stdout carries exactly one document; warnings are already in the report.
        tracing::warn!("{message}");
    }
}
