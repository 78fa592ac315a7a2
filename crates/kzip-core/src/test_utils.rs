//! Test utilities for assembling KZIP archives in memory.
//!
//! The inspector never writes archives; these helpers exist so tests and
//! benchmarks can produce well-formed and deliberately broken inputs.

use crate::formats::header::HEADER_SIZE;
use crate::formats::header::MAGIC;
use crate::formats::record::DIRECTORY_LEN;
use crate::formats::record::NAME_LEN;
use crate::formats::record::RECORD_HEADER_SIZE;
use crate::formats::toc::TOC_ENTRY_SIZE;
use crate::inspection::verify::md5_bytes;

/// Description of one file record.
///
/// Checksums default to the correct values for the payload; the `raw_*`
/// setters replace them with arbitrary stored bytes.
///
/// The format cannot express an empty payload: an empty `data` still
/// stores a length field of 0, which decoders read as one byte.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    name: String,
    directory: String,
    timestamp: u32,
    data: Vec<u8>,
    raw_crc32: Option<[u8; 4]>,
    raw_md5: Option<[u8; 16]>,
    length_field: Option<u64>,
}

impl RecordSpec {
    /// Creates a record in the archive root with timestamp 0.
    #[must_use]
    pub fn new(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            directory: String::new(),
            timestamp: 0,
            data: data.to_vec(),
            raw_crc32: None,
            raw_md5: None,
            length_field: None,
        }
    }

    /// Sets the subdirectory.
    #[must_use]
    pub fn directory(mut self, directory: &str) -> Self {
        self.directory = directory.to_string();
        self
    }

    /// Sets the Unix timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Stores these exact bytes in the CRC32 field.
    #[must_use]
    pub fn raw_crc32(mut self, crc32: [u8; 4]) -> Self {
        self.raw_crc32 = Some(crc32);
        self
    }

    /// Stores these exact bytes in the MD5 field.
    #[must_use]
    pub fn raw_md5(mut self, md5: [u8; 16]) -> Self {
        self.raw_md5 = Some(md5);
        self
    }

    /// Stores this value in the payload length field.
    #[must_use]
    pub fn length_field(mut self, value: u64) -> Self {
        self.length_field = Some(value);
        self
    }

    /// Encoded size of the record (header plus payload bytes written).
    #[must_use]
    pub fn encoded_len(&self) -> u64 {
        RECORD_HEADER_SIZE + self.data.len() as u64
    }

    /// CRC32 field bytes as stored on disk for `data`.
    ///
    /// The reported (byte-reversed) value is the little-endian CRC, so the
    /// stored field is the big-endian CRC.
    #[must_use]
    pub fn stored_crc32_for(data: &[u8]) -> [u8; 4] {
        crc32fast::hash(data).to_be_bytes()
    }

    /// Appends the encoded record to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        write_padded(out, self.name.as_bytes(), NAME_LEN);
        write_padded(out, self.directory.as_bytes(), DIRECTORY_LEN);
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(
            &self
                .raw_crc32
                .unwrap_or_else(|| Self::stored_crc32_for(&self.data)),
        );
        let md5 = self
            .raw_md5
            .unwrap_or_else(|| md5_bytes(&self.data));
        out.extend_from_slice(&md5);
        let length = self
            .length_field
            .unwrap_or_else(|| (self.data.len() as u64).saturating_sub(1));
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&self.data);
    }
}

fn write_padded(out: &mut Vec<u8>, text: &[u8], width: u64) {
    let width = width as usize;
    let take = text.len().min(width);
    out.extend_from_slice(&text[..take]);
    out.resize(out.len() + (width - take), 0);
}

/// Builder for complete archives.
///
/// Records are laid out back to back after the TOC unless explicit TOC
/// offsets are supplied.
///
/// # Examples
///
/// ```
/// use kzip_core::test_utils::KzipBuilder;
/// use kzip_core::test_utils::RecordSpec;
///
/// let bytes = KzipBuilder::new()
///     .add(RecordSpec::new("hello.txt", b"abc"))
///     .build();
/// assert_eq!(&bytes[..4], b"KZIP");
/// ```
#[derive(Debug, Clone)]
pub struct KzipBuilder {
    version: u8,
    compression: u8,
    file_count: Option<u16>,
    toc: Option<Vec<u64>>,
    records: Vec<RecordSpec>,
    trailing: Vec<u8>,
}

impl KzipBuilder {
    /// Creates a builder for a v1 archive with Raw compression.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: 0x01,
            compression: 0x00,
            file_count: None,
            toc: None,
            records: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Sets the raw version byte.
    #[must_use]
    pub fn version(mut self, byte: u8) -> Self {
        self.version = byte;
        self
    }

    /// Sets the raw compression byte.
    #[must_use]
    pub fn compression(mut self, byte: u8) -> Self {
        self.compression = byte;
        self
    }

    /// Overrides the declared file count.
    #[must_use]
    pub fn file_count(mut self, count: u16) -> Self {
        self.file_count = Some(count);
        self
    }

    /// Overrides the TOC offsets written after the header.
    #[must_use]
    pub fn toc(mut self, offsets: Vec<u64>) -> Self {
        self.toc = Some(offsets);
        self
    }

    /// Appends a record.
    #[must_use]
    pub fn add(mut self, record: RecordSpec) -> Self {
        self.records.push(record);
        self
    }

    /// Appends bytes after the last record.
    #[must_use]
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    /// Offsets the records receive when laid out back to back.
    #[must_use]
    pub fn natural_offsets(&self) -> Vec<u64> {
        let toc_len = self
            .toc
            .as_ref()
            .map_or(self.records.len(), Vec::len) as u64;
        let mut offset = HEADER_SIZE + TOC_ENTRY_SIZE * toc_len;
        self.records
            .iter()
            .map(|record| {
                let current = offset;
                offset += record.encoded_len();
                current
            })
            .collect()
    }

    /// Encodes the archive.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let offsets = self.toc.clone().unwrap_or_else(|| self.natural_offsets());
        let count = self.file_count.unwrap_or(self.records.len() as u16);

        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(self.compression);
        out.extend_from_slice(&count.to_be_bytes());
        for offset in &offsets {
            out.extend_from_slice(&offset.to_be_bytes());
        }
        for record in &self.records {
            record.write_to(&mut out);
        }
        out.extend_from_slice(&self.trailing);
        out
    }
}

impl Default for KzipBuilder {
    fn default() -> Self {
        Self::new()
    }
}
