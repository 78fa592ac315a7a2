//! File record decoding.
//!
//! A record starts at the offset named by its TOC entry and consists of a
//! 288-byte fixed header followed by the payload:
//!
//! | offset | size | field | encoding |
//! |---|---|---|---|
//! | 0 | 128 | name | UTF-8, NUL/space padded |
//! | 128 | 128 | directory | UTF-8, padded, empty for root |
//! | 256 | 4 | timestamp | u32 big-endian, Unix seconds |
//! | 260 | 4 | crc32 | byte-reversed |
//! | 264 | 16 | md5 | raw digest |
//! | 280 | 8 | payload length | u64 big-endian, size minus one |
//! | 288 | length + 1 | payload | raw |

use chrono::DateTime;
use chrono::Local;
use chrono::Utc;

use crate::KzipError;
use crate::Result;
use crate::error::ArchiveField;
use crate::formats::toc::TocEntry;
use crate::source::ByteSource;
use crate::source::ReadContext;

/// Width of the name field.
pub const NAME_LEN: u64 = 128;
/// Width of the directory field.
pub const DIRECTORY_LEN: u64 = 128;

const NAME_OFFSET: u64 = 0;
const DIRECTORY_OFFSET: u64 = NAME_OFFSET + NAME_LEN;
const TIMESTAMP_OFFSET: u64 = DIRECTORY_OFFSET + DIRECTORY_LEN;
const CRC32_OFFSET: u64 = TIMESTAMP_OFFSET + 4;
const MD5_OFFSET: u64 = CRC32_OFFSET + 4;
const PAYLOAD_LENGTH_OFFSET: u64 = MD5_OFFSET + 16;

/// Size of the fixed record header preceding the payload.
pub const RECORD_HEADER_SIZE: u64 = PAYLOAD_LENGTH_OFFSET + 8;

/// A decoded file record borrowing its payload from the archive buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord<'a> {
    /// TOC entry the record was decoded from.
    pub entry: TocEntry,
    /// File name with padding stripped.
    pub name: String,
    /// Subdirectory with padding stripped; empty means the archive root.
    pub directory: String,
    /// Modification time in Unix seconds.
    pub timestamp: u32,
    /// Stored CRC32 in reportable order (the wire bytes reversed).
    pub crc32: [u8; 4],
    /// Stored MD5 digest.
    pub md5: [u8; 16],
    /// Raw payload length field, one less than the payload size.
    pub payload_length_field: u64,
    /// Payload bytes.
    pub payload: &'a [u8],
}

impl<'a> FileRecord<'a> {
    /// Decodes the record named by `entry`.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedArchive` naming the field and `entry.index` when any
    /// read runs past the end of the archive, including a payload length
    /// field whose size cannot be represented.
    pub fn decode(source: &ByteSource<'a>, entry: TocEntry) -> Result<Self> {
        let base = entry.offset;
        let ctx = |field| ReadContext::file(field, entry.index);

        let name = source.slice(
            base.saturating_add(NAME_OFFSET),
            NAME_LEN,
            ctx(ArchiveField::Name),
        )?;
        let directory = source.slice(
            base.saturating_add(DIRECTORY_OFFSET),
            DIRECTORY_LEN,
            ctx(ArchiveField::Directory),
        )?;
        let timestamp = source.u32_be(
            base.saturating_add(TIMESTAMP_OFFSET),
            ctx(ArchiveField::Timestamp),
        )?;
        let mut crc32: [u8; 4] =
            source.array(base.saturating_add(CRC32_OFFSET), ctx(ArchiveField::Crc32))?;
        crc32.reverse();
        let md5 = source.array(base.saturating_add(MD5_OFFSET), ctx(ArchiveField::Md5))?;
        let payload_length_field = source.u64_be(
            base.saturating_add(PAYLOAD_LENGTH_OFFSET),
            ctx(ArchiveField::PayloadLength),
        )?;

        let payload_start = base.saturating_add(RECORD_HEADER_SIZE);
        let payload_size =
            payload_length_field
                .checked_add(1)
                .ok_or_else(|| KzipError::TruncatedArchive {
                    field: ArchiveField::Payload,
                    file_index: Some(entry.index),
                    offset: payload_start,
                    len: u64::MAX,
                    archive_size: source.len(),
                })?;
        let payload = source.slice(payload_start, payload_size, ctx(ArchiveField::Payload))?;

        Ok(Self {
            entry,
            name: decode_text(name),
            directory: decode_text(directory),
            timestamp,
            crc32,
            md5,
            payload_length_field,
            payload,
        })
    }

    /// Payload size in bytes (`payload_length_field + 1`).
    #[must_use]
    pub fn payload_size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// The CRC32 field exactly as stored on disk.
    #[must_use]
    pub fn stored_crc32_field(&self) -> [u8; 4] {
        let mut raw = self.crc32;
        raw.reverse();
        raw
    }

    /// Returns `true` if the record lives in the archive root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.directory.is_empty()
    }

    /// Byte range `[start, end)` covered by the record header and payload.
    #[must_use]
    pub fn span(&self) -> (u64, u64) {
        let end = self
            .entry
            .offset
            .saturating_add(RECORD_HEADER_SIZE)
            .saturating_add(self.payload_size());
        (self.entry.offset, end)
    }

    /// Modification time in UTC.
    #[must_use]
    pub fn modified_utc(&self) -> DateTime<Utc> {
        timestamp_utc(self.timestamp)
    }

    /// Modification time in the local timezone.
    #[must_use]
    pub fn modified_local(&self) -> DateTime<Local> {
        self.modified_utc().with_timezone(&Local)
    }
}

/// Converts Unix seconds into a UTC calendar time.
#[must_use]
pub fn timestamp_utc(seconds: u32) -> DateTime<Utc> {
    DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
}

/// Lossy UTF-8 decode with padding stripped from both ends.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}
