//! Read-only inspector for KZIP archive containers.
//!
//! `kzip-core` decodes the archive header, walks the table of contents,
//! decodes every file record and recomputes each payload's CRC32 and MD5
//! against the stored values. Archives are never modified and payloads are
//! never decompressed or written out.
//!
//! # Examples
//!
//! ```no_run
//! use kzip_core::InspectConfig;
//! use kzip_core::inspect_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InspectConfig::default();
//! let report = inspect_archive("bundle.kzip", &config)?;
//! println!(
//!     "{} ({} files, {} compression)",
//!     report.header.version,
//!     report.files.len(),
//!     report.header.compression
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod formats;
pub mod inspection;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main API types
pub use api::inspect_archive;
pub use api::inspect_bytes;
pub use archive::KzipArchive;
pub use config::InspectConfig;
pub use error::ArchiveField;
pub use error::KzipError;
pub use error::Result;
pub use inspection::ArchiveReport;
pub use inspection::FileReport;
pub use inspection::LayoutIssue;
pub use inspection::VerificationResult;
pub use inspection::verify_payload;

// Re-export format types for easier access
pub use formats::ArchiveHeader;
pub use formats::CompressionMode;
pub use formats::FileRecord;
pub use formats::FormatVersion;
pub use formats::TocEntry;
