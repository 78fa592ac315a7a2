//! Archive inspection: decode every record and verify its checksums.
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
//!
//! println!("Archive contains {} files", report.files.len());
//! for file in report.mismatches() {
//!     eprintln!("checksum mismatch: {}", file.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod inspect;
pub mod report;
pub mod verify;

pub use inspect::inspect_source;
pub use report::ArchiveReport;
pub use report::FileReport;
pub use report::LayoutIssue;
pub use verify::VerificationResult;
pub use verify::verify_payload;
pub use verify::verify_record;
