//! Bounds-checked access to archive bytes held in memory.
//!
//! Every decoder reads through [`ByteSource`], so a read past the end of the
//! buffer always surfaces as [`KzipError::TruncatedArchive`] with the field
//! and file index that caused it, never as a panic.

use crate::KzipError;
use crate::Result;
use crate::error::ArchiveField;

/// Where a read originates, used to label truncation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadContext {
    /// Field being read.
    pub field: ArchiveField,
    /// 1-based file index, `None` for header reads.
    pub file_index: Option<usize>,
}

impl ReadContext {
    /// Context for a header field read.
    #[must_use]
    pub const fn header(field: ArchiveField) -> Self {
        Self {
            field,
            file_index: None,
        }
    }

    /// Context for a read on behalf of the file at `index` (1-based).
    #[must_use]
    pub const fn file(field: ArchiveField, index: usize) -> Self {
        Self {
            field,
            file_index: Some(index),
        }
    }
}

/// Immutable view over the fully loaded archive bytes.
#[derive(Debug, Clone, Copy)]
pub struct ByteSource<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteSource<'a> {
    /// Wraps a byte slice.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Total number of bytes available.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns `true` if the source holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns `TruncatedArchive` if `offset + len` overflows or lies past
    /// the end of the buffer.
    pub fn slice(&self, offset: u64, len: u64, ctx: ReadContext) -> Result<&'a [u8]> {
        let truncated = || KzipError::TruncatedArchive {
            field: ctx.field,
            file_index: ctx.file_index,
            offset,
            len,
            archive_size: self.len(),
        };

        let end = offset.checked_add(len).ok_or_else(truncated)?;
        if end > self.len() {
            return Err(truncated());
        }
        let start = usize::try_from(offset).map_err(|_| truncated())?;
        let end = usize::try_from(end).map_err(|_| truncated())?;
        Ok(&self.bytes[start..end])
    }

    /// Reads a fixed-size array starting at `offset`.
    pub fn array<const N: usize>(&self, offset: u64, ctx: ReadContext) -> Result<[u8; N]> {
        let bytes = self.slice(offset, N as u64, ctx)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a single byte.
    pub fn u8_at(&self, offset: u64, ctx: ReadContext) -> Result<u8> {
        let [b] = self.array::<1>(offset, ctx)?;
        Ok(b)
    }

    /// Reads a big-endian `u16`.
    pub fn u16_be(&self, offset: u64, ctx: ReadContext) -> Result<u16> {
        self.array(offset, ctx).map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn u32_be(&self, offset: u64, ctx: ReadContext) -> Result<u32> {
        self.array(offset, ctx).map(u32::from_be_bytes)
    }

    /// Reads a big-endian `u64`.
    pub fn u64_be(&self, offset: u64, ctx: ReadContext) -> Result<u64> {
        self.array(offset, ctx).map(u64::from_be_bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CTX: ReadContext = ReadContext::file(ArchiveField::Payload, 2);

    #[test]
    fn test_big_endian_reads() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let src = ByteSource::new(&data);
        assert_eq!(src.u8_at(0, CTX).unwrap(), 0x01);
        assert_eq!(src.u16_be(0, CTX).unwrap(), 0x0102);
        assert_eq!(src.u32_be(4, CTX).unwrap(), 0x0506_0708);
        assert_eq!(src.u64_be(0, CTX).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_slice_exact_end() {
        let data = [0u8; 4];
        let src = ByteSource::new(&data);
        assert_eq!(src.slice(0, 4, CTX).unwrap().len(), 4);
        assert!(src.slice(4, 0, CTX).unwrap().is_empty());
    }

    #[test]
    fn test_slice_past_end_reports_context() {
        let data = [0u8; 4];
        let src = ByteSource::new(&data);
        let err = src.slice(2, 3, CTX).unwrap_err();
        match err {
            KzipError::TruncatedArchive {
                field,
                file_index,
                offset,
                len,
                archive_size,
            } => {
                assert_eq!(field, ArchiveField::Payload);
                assert_eq!(file_index, Some(2));
                assert_eq!(offset, 2);
                assert_eq!(len, 3);
                assert_eq!(archive_size, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_slice_overflowing_range() {
        let data = [0u8; 4];
        let src = ByteSource::new(&data);
        assert!(src.slice(u64::MAX, 2, CTX).is_err());
        assert!(src.u64_be(u64::MAX - 3, CTX).is_err());
    }

    #[test]
    fn test_empty_source() {
        let src = ByteSource::new(&[]);
        assert!(src.is_empty());
        assert_eq!(src.len(), 0);
        assert!(src.u8_at(0, ReadContext::header(ArchiveField::Version)).is_err());
    }
}
