//! Output formatting module.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use json::JsonFormatter;
use kzip_core::LayoutIssue;

/// Creates an output formatter based on CLI flags
pub fn create_formatter(
    json: bool,
    verbose: bool,
    quiet: bool,
    utc: bool,
) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter::new(quiet))
    } else {
        Box::new(HumanFormatter::new(verbose, quiet, utc))
    }
}

/// Uppercase hex without separators.
fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02X}");
        out
    })
}

/// One-line description of a layout finding.
fn describe_issue(issue: &LayoutIssue) -> String {
    match *issue {
        LayoutIssue::OutOfOrder {
            index,
            offset,
            previous_offset,
        } => format!(
            "file {index} at offset {offset} comes before the previous entry at {previous_offset}"
        ),
        LayoutIssue::Overlap { index, other_index } => {
            format!("file {index} overlaps file {other_index}")
        }
        LayoutIssue::OverlapsToc {
            index,
            offset,
            toc_end,
        } => format!("file {index} at offset {offset} starts inside the header or TOC (ends at {toc_end})"),
        LayoutIssue::TrailingBytes { offset, len } => {
            format!("{len} unreferenced bytes at offset {offset}")
        }
    }
}

/// Stable machine name of a layout finding.
const fn issue_kind(issue: &LayoutIssue) -> &'static str {
    match issue {
        LayoutIssue::OutOfOrder { .. } => "out_of_order",
        LayoutIssue::Overlap { .. } => "overlap",
        LayoutIssue::OverlapsToc { .. } => "overlaps_toc",
        LayoutIssue::TrailingBytes { .. } => "trailing_bytes",
    }
}
