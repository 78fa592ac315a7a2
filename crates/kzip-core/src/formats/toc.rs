//! Table-of-contents walker.

use crate::Result;
use crate::error::ArchiveField;
use crate::formats::header::ArchiveHeader;
use crate::formats::header::HEADER_SIZE;
use crate::source::ByteSource;
use crate::source::ReadContext;

/// Width of one TOC entry in bytes.
pub const TOC_ENTRY_SIZE: u64 = 8;

/// One table-of-contents entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TocEntry {
    /// 1-based position in the TOC.
    pub index: usize,
    /// Absolute offset of the file record.
    pub offset: u64,
}

/// Lazy iterator over the TOC entries of an archive.
///
/// Yields exactly `file_count` items unless a read fails, in which case the
/// error is yielded once and the walker is exhausted. Offsets are passed
/// through untouched: ordering, duplicates and overlaps are left to the
/// caller.
#[derive(Debug, Clone)]
pub struct TocWalker<'a> {
    source: ByteSource<'a>,
    next: usize,
    count: usize,
}

impl<'a> TocWalker<'a> {
    /// Creates a walker for the entries declared by `header`.
    #[must_use]
    pub fn new(source: ByteSource<'a>, header: &ArchiveHeader) -> Self {
        Self {
            source,
            next: 0,
            count: usize::from(header.file_count),
        }
    }

    fn read_entry(&self, position: usize) -> Result<TocEntry> {
        let index = position + 1;
        let at = HEADER_SIZE + TOC_ENTRY_SIZE * position as u64;
        let offset = self
            .source
            .u64_be(at, ReadContext::file(ArchiveField::TocEntry, index))?;
        Ok(TocEntry { index, offset })
    }
}

impl Iterator for TocWalker<'_> {
    type Item = Result<TocEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let item = self.read_entry(self.next);
        self.next = if item.is_ok() { self.next + 1 } else { self.count };
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for TocWalker<'_> {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::KzipError;

    fn archive(count: u16, offsets: &[u64]) -> Vec<u8> {
        let mut bytes = b"KZIP\x01\x00".to_vec();
        bytes.extend_from_slice(&count.to_be_bytes());
        for offset in offsets {
            bytes.extend_from_slice(&offset.to_be_bytes());
        }
        bytes
    }

    fn walk(bytes: &[u8]) -> Vec<Result<TocEntry>> {
        let source = ByteSource::new(bytes);
        let header = ArchiveHeader::decode(&source).unwrap();
        TocWalker::new(source, &header).collect()
    }

    #[test]
    fn test_walks_entries_in_order() {
        let bytes = archive(3, &[500, 40, 0x0102_0304_0506_0708]);
        let entries: Vec<_> = walk(&bytes).into_iter().map(Result::unwrap).collect();
        assert_eq!(
            entries,
            vec![
                TocEntry { index: 1, offset: 500 },
                TocEntry { index: 2, offset: 40 },
                TocEntry {
                    index: 3,
                    offset: 0x0102_0304_0506_0708
                },
            ]
        );
    }

    #[test]
    fn test_zero_files() {
        let bytes = archive(0, &[]);
        assert!(walk(&bytes).is_empty());
    }

    #[test]
    fn test_duplicates_are_passed_through() {
        let bytes = archive(2, &[24, 24]);
        let entries: Vec<_> = walk(&bytes).into_iter().map(Result::unwrap).collect();
        assert_eq!(entries[0].offset, entries[1].offset);
    }

    #[test]
    fn test_truncated_toc_stops_after_error() {
        let mut bytes = archive(3, &[100]);
        bytes.extend_from_slice(&[0, 0, 0]);
        let items = walk(&bytes);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        match &items[1] {
            Err(KzipError::TruncatedArchive {
                field, file_index, ..
            }) => {
                assert_eq!(*field, ArchiveField::TocEntry);
                assert_eq!(*file_index, Some(2));
            }
            other => panic!("unexpected item: {other:?}"),
        }
    }

    #[test]
    fn test_size_hint_bounds_remaining() {
        let bytes = archive(2, &[16, 32]);
        let source = ByteSource::new(&bytes);
        let header = ArchiveHeader::decode(&source).unwrap();
        let mut walker = TocWalker::new(source, &header);
        assert_eq!(walker.size_hint(), (0, Some(2)));
        walker.next();
        assert_eq!(walker.size_hint(), (0, Some(1)));
    }
}
