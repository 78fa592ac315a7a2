//! Error types for KZIP decoding operations.

use thiserror::Error;

/// Result type alias using `KzipError`.
pub type Result<T> = std::result::Result<T, KzipError>;

/// A fixed-offset or length-derived region of the archive.
///
/// Carried by [`KzipError::TruncatedArchive`] so callers can tell which read
/// ran past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveField {
    /// Version byte of the archive header (byte 4).
    Version,
    /// Compression-mode byte of the archive header (byte 5).
    Compression,
    /// File count of the archive header (bytes 6..8).
    FileCount,
    /// An 8-byte table-of-contents entry.
    TocEntry,
    /// 128-byte record name.
    Name,
    /// 128-byte record directory.
    Directory,
    /// 4-byte record timestamp.
    Timestamp,
    /// 4-byte stored CRC32.
    Crc32,
    /// 16-byte stored MD5 digest.
    Md5,
    /// 8-byte payload length field.
    PayloadLength,
    /// Variable-length payload bytes.
    Payload,
}

impl ArchiveField {
    /// Returns a short lowercase label for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Compression => "compression mode",
            Self::FileCount => "file count",
            Self::TocEntry => "toc entry",
            Self::Name => "name",
            Self::Directory => "directory",
            Self::Timestamp => "timestamp",
            Self::Crc32 => "crc32",
            Self::Md5 => "md5",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
        }
    }

    /// Returns `true` for fields that belong to the 8-byte archive header.
    #[must_use]
    pub const fn is_header_field(self) -> bool {
        matches!(self, Self::Version | Self::Compression | Self::FileCount)
    }
}

impl std::fmt::Display for ArchiveField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while decoding a KZIP archive.
///
/// Every variant is fatal to the current run. Checksum mismatches are not
/// errors; they are reported through
/// [`VerificationResult`](crate::VerificationResult).
#[derive(Error, Debug)]
pub enum KzipError {
    /// I/O operation failed while loading the archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Magic signature is not `KZIP`.
    #[error("invalid archive: missing KZIP signature")]
    InvalidArchive,

    /// Version byte is not in the version table.
    #[error("unsupported archive version: {byte:#04x}")]
    UnsupportedVersion {
        /// The raw version byte.
        byte: u8,
    },

    /// Compression byte is not in the compression table.
    #[error("unsupported compression mode: {byte:#04x}")]
    UnsupportedCompression {
        /// The raw compression byte.
        byte: u8,
    },

    /// A read extends past the end of the archive.
    #[error(
        "truncated archive: {field}{} needs {len} bytes at offset {offset}, archive is {archive_size} bytes",
        file_suffix(.file_index)
    )]
    TruncatedArchive {
        /// The region that could not be read.
        field: ArchiveField,
        /// 1-based index of the file being decoded, `None` for header reads.
        file_index: Option<usize>,
        /// Absolute offset of the attempted read.
        offset: u64,
        /// Length of the attempted read in bytes.
        len: u64,
        /// Total archive size in bytes.
        archive_size: u64,
    },

    /// The archive file is larger than the configured load limit.
    #[error("archive too large: {size} bytes exceeds limit of {max} bytes")]
    ArchiveTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },
}

fn file_suffix(file_index: &Option<usize>) -> String {
    file_index.map_or_else(String::new, |i| format!(" of file {i}"))
}

impl KzipError {
    /// Returns `true` if the error comes from the archive's own structure
    /// rather than from loading it.
    ///
    /// # Examples
    ///
    /// ```
    /// use kzip_core::KzipError;
    ///
    /// assert!(KzipError::InvalidArchive.is_structural());
    /// assert!(!KzipError::ArchiveTooLarge { size: 10, max: 5 }.is_structural());
    /// ```
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive
                | Self::UnsupportedVersion { .. }
                | Self::UnsupportedCompression { .. }
                | Self::TruncatedArchive { .. }
        )
    }

    /// Returns the 1-based index of the file whose decode failed, if any.
    #[must_use]
    pub const fn file_index(&self) -> Option<usize> {
        match self {
            Self::TruncatedArchive { file_index, .. } => *file_index,
            _ => None,
        }
    }

    /// Returns the field whose read ran past the end, if any.
    #[must_use]
    pub const fn field(&self) -> Option<ArchiveField> {
        match self {
            Self::TruncatedArchive { field, .. } => Some(*field),
            _ => None,
        }
    }
}
