//! KZIP on-disk structures.
//!
//! An archive is a fixed 8-byte header, a table of contents with one
//! big-endian `u64` offset per file, and a 288-byte record header plus
//! payload at each of those offsets.

pub mod header;
pub mod record;
pub mod toc;

pub use header::ArchiveHeader;
pub use header::CompressionMode;
pub use header::FormatVersion;
pub use record::FileRecord;
pub use toc::TocEntry;
pub use toc::TocWalker;
