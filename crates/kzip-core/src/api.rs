//! High-level public API for archive inspection.

use std::path::Path;

use crate::InspectConfig;
use crate::KzipArchive;
use crate::Result;
use crate::inspection::inspect_source;
use crate::inspection::report::ArchiveReport;
use crate::source::ByteSource;

/// Loads an archive file and inspects it.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `config` - Inspection configuration
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or exceeds `config.max_archive_size`
/// - The signature, version or compression tag is not recognized
/// - Any header, TOC or record read runs past the end of the archive
///
/// Checksum mismatches are reported in the returned [`ArchiveReport`], not
/// as errors.
///
/// # Examples
///
/// ```no_run
/// use kzip_core::InspectConfig;
/// use kzip_core::inspect_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = inspect_archive("bundle.kzip", &InspectConfig::default())?;
/// if report.all_verified() {
///     println!("All {} files verified", report.files.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn inspect_archive<P: AsRef<Path>>(
    archive_path: P,
    config: &InspectConfig,
) -> Result<ArchiveReport> {
    KzipArchive::open(archive_path, config)?.inspect(config)
}

/// Inspects archive bytes already in memory.
///
/// # Errors
///
/// Same structural errors as [`inspect_archive`]; never `Io`.
///
/// # Examples
///
/// ```
/// use kzip_core::InspectConfig;
/// use kzip_core::inspect_bytes;
///
/// let bytes = [0x4B, 0x5A, 0x49, 0x50, 0x01, 0x00, 0x00, 0x00];
/// let report = inspect_bytes(&bytes, &InspectConfig::default()).unwrap();
/// assert!(report.files.is_empty());
/// ```
pub fn inspect_bytes(bytes: &[u8], config: &InspectConfig) -> Result<ArchiveReport> {
    inspect_source(ByteSource::new(bytes), config)
}
