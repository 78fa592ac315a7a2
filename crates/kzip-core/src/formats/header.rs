//! Archive header decoding.
//!
//! The header occupies bytes `[0, 8)`:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `KZIP` |
//! | 4 | 1 | version tag |
//! | 5 | 1 | compression-mode tag |
//! | 6 | 2 | file count, big-endian |

use crate::KzipError;
use crate::Result;
use crate::error::ArchiveField;
use crate::source::ByteSource;
use crate::source::ReadContext;

/// Magic signature at the start of every archive.
pub const MAGIC: [u8; 4] = *b"KZIP";

/// Size of the archive header in bytes.
pub const HEADER_SIZE: u64 = 8;

/// Archive format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Version tag `0x01`.
    V1,
}

impl FormatVersion {
    /// Resolves a version tag.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion` for any tag outside the version table.
    pub const fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x01 => Ok(Self::V1),
            _ => Err(KzipError::UnsupportedVersion { byte }),
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::V1 => 0x01,
        }
    }

    /// Returns the display label of the version.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::V1 => "v1.0.x",
        }
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Compression mode declared by the archive.
///
/// Payloads are never decompressed; the mode is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionMode {
    /// Stored without compression (`0x00`).
    Raw,
    /// Run-length encoded (`0x01`).
    Rle,
    /// Deflate (`0x02`).
    Deflate,
}

impl CompressionMode {
    /// Resolves a compression tag.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedCompression` for any tag outside the table.
    pub const fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Self::Raw),
            0x01 => Ok(Self::Rle),
            0x02 => Ok(Self::Deflate),
            _ => Err(KzipError::UnsupportedCompression { byte }),
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Raw => 0x00,
            Self::Rle => 0x01,
            Self::Deflate => 0x02,
        }
    }

    /// Returns the display label of the mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Raw => "Raw",
            Self::Rle => "RLE",
            Self::Deflate => "Deflate",
        }
    }
}

impl std::fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    /// Format version.
    pub version: FormatVersion,
    /// Declared compression mode.
    pub compression: CompressionMode,
    /// Number of TOC entries.
    pub file_count: u16,
}

impl ArchiveHeader {
    /// Decodes the header from the start of the archive.
    ///
    /// Checks run in wire order: magic, version, compression, file count.
    /// Nothing past byte 8 is read.
    ///
    /// # Errors
    ///
    /// - `InvalidArchive` if the first four bytes are not `KZIP` (or the
    ///   buffer is shorter than four bytes)
    /// - `UnsupportedVersion` / `UnsupportedCompression` for unknown tags
    /// - `TruncatedArchive` if the buffer ends inside the header
    ///
    /// # Examples
    ///
    /// ```
    /// use kzip_core::ArchiveHeader;
    /// use kzip_core::CompressionMode;
    /// use kzip_core::source::ByteSource;
    ///
    /// let bytes = [0x4B, 0x5A, 0x49, 0x50, 0x01, 0x00, 0x00, 0x01];
    /// let header = ArchiveHeader::decode(&ByteSource::new(&bytes)).unwrap();
    /// assert_eq!(header.compression, CompressionMode::Raw);
    /// assert_eq!(header.file_count, 1);
    /// ```
    pub fn decode(source: &ByteSource<'_>) -> Result<Self> {
        let bytes = source.as_bytes();
        if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(KzipError::InvalidArchive);
        }

        let version =
            FormatVersion::from_byte(source.u8_at(4, ReadContext::header(ArchiveField::Version))?)?;
        let compression = CompressionMode::from_byte(
            source.u8_at(5, ReadContext::header(ArchiveField::Compression))?,
        )?;
        let file_count = source.u16_be(6, ReadContext::header(ArchiveField::FileCount))?;

        Ok(Self {
            version,
            compression,
            file_count,
        })
    }

    /// Encodes the header back into its 8 wire bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 8] {
        let count = self.file_count.to_be_bytes();
        [
            MAGIC[0],
            MAGIC[1],
            MAGIC[2],
            MAGIC[3],
            self.version.as_byte(),
            self.compression.as_byte(),
            count[0],
            count[1],
        ]
    }

    /// End of the TOC region, i.e. the first byte a record may start at
    /// without overlapping the header or TOC.
    #[must_use]
    pub fn toc_end(&self) -> u64 {
        HEADER_SIZE + 8 * u64::from(self.file_count)
    }
}
