//! Error conversion utilities for CLI.
//!
//! Converts kzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use kzip_core::KzipError;
use std::path::Path;

/// Converts `KzipError` to user-friendly anyhow error with context
pub fn convert_kzip_error(err: KzipError, archive: &Path) -> anyhow::Error {
    match err {
        KzipError::InvalidArchive => {
            anyhow!(
                "Invalid archive '{}': missing KZIP signature\n\
                 HINT: The file is not a KZIP archive or its header is corrupted.",
                archive.display()
            )
        }
        KzipError::UnsupportedVersion { byte } => {
            anyhow!(
                "Unsupported archive version in '{}': 0x{byte:02X}\n\
                 HINT: Only version 0x01 (v1.0.x) archives can be inspected.",
                archive.display()
            )
        }
        KzipError::UnsupportedCompression { byte } => {
            anyhow!(
                "Unknown compression mode in '{}': 0x{byte:02X}\n\
                 HINT: Known modes are 0x00 (Raw), 0x01 (RLE) and 0x02 (Deflate).",
                archive.display()
            )
        }
        KzipError::TruncatedArchive {
            field,
            file_index,
            offset,
            len,
            archive_size,
        } => {
            let location =
                file_index.map_or_else(|| "header".to_string(), |i| format!("file {i}"));
            anyhow!(
                "Truncated archive '{}': {location} field '{field}' needs {len} bytes at \
                 offset {offset}, but the archive is {archive_size} bytes\n\
                 HINT: The archive may be incomplete or its table of contents corrupted.",
                archive.display()
            )
        }
        KzipError::ArchiveTooLarge { size, max } => {
            anyhow!(
                "Archive '{}' is {size} bytes, above the {max} byte limit\n\
                 HINT: Use --max-size to raise the limit.",
                archive.display()
            )
        }
        KzipError::Io(io_err) => {
            anyhow!(
                "I/O error while reading '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(result: Result<T, KzipError>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_kzip_error(e, archive))
}
