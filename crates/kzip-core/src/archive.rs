//! In-memory archive handle.

use std::path::Path;

use crate::InspectConfig;
use crate::KzipError;
use crate::Result;
use crate::formats::header::ArchiveHeader;
use crate::formats::record::FileRecord;
use crate::formats::toc::TocWalker;
use crate::inspection::inspect_source;
use crate::inspection::report::ArchiveReport;
use crate::source::ByteSource;

/// A KZIP archive loaded fully into memory.
///
/// All accessors decode on demand from the immutable buffer; nothing is
/// cached between calls.
///
/// # Examples
///
/// ```no_run
/// use kzip_core::InspectConfig;
/// use kzip_core::KzipArchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = KzipArchive::open("bundle.kzip", &InspectConfig::default())?;
/// for record in archive.records()? {
///     let record = record?;
///     println!("{} ({} bytes)", record.name, record.payload_size());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KzipArchive {
    bytes: Vec<u8>,
}

impl KzipArchive {
    /// Reads an archive file into memory.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveTooLarge` if the file exceeds
    /// `config.max_archive_size`, or `Io` if it cannot be read.
    pub fn open<P: AsRef<Path>>(path: P, config: &InspectConfig) -> Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > config.max_archive_size {
            return Err(KzipError::ArchiveTooLarge {
                size,
                max: config.max_archive_size,
            });
        }

        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "loaded archive");
        Ok(Self { bytes })
    }

    /// Wraps bytes already in memory.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw archive bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bounds-checked view over the archive bytes.
    #[must_use]
    pub fn source(&self) -> ByteSource<'_> {
        ByteSource::new(&self.bytes)
    }

    /// Decodes the archive header.
    pub fn header(&self) -> Result<ArchiveHeader> {
        ArchiveHeader::decode(&self.source())
    }

    /// Returns a walker over the TOC entries.
    pub fn toc(&self) -> Result<TocWalker<'_>> {
        let header = self.header()?;
        Ok(TocWalker::new(self.source(), &header))
    }

    /// Returns a lazy iterator decoding each record in TOC order.
    pub fn records(&self) -> Result<Records<'_>> {
        Ok(Records {
            source: self.source(),
            toc: self.toc()?,
            failed: false,
        })
    }

    /// Decodes and verifies the whole archive.
    pub fn inspect(&self, config: &InspectConfig) -> Result<ArchiveReport> {
        inspect_source(self.source(), config)
    }
}

impl From<Vec<u8>> for KzipArchive {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Iterator over decoded file records.
///
/// Stops after the first error.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    source: ByteSource<'a>,
    toc: TocWalker<'a>,
    failed: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<FileRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self
            .toc
            .next()?
            .and_then(|entry| FileRecord::decode(&self.source, entry));
        self.failed = item.is_err();
        Some(item)
    }
}

impl std::iter::FusedIterator for Records<'_> {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::KzipBuilder;
    use crate::test_utils::RecordSpec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<u8> {
        KzipBuilder::new()
            .add(RecordSpec::new("one.txt", b"first"))
            .add(RecordSpec::new("two.txt", b"second").directory("sub"))
            .build()
    }

    #[test]
    fn test_records_in_toc_order() {
        let archive = KzipArchive::from_bytes(sample());
        let names: Vec<_> = archive
            .records()
            .unwrap()
            .map(|r| r.unwrap().name)
            .collect();
        assert_eq!(names, vec!["one.txt", "two.txt"]);
    }

    #[test]
    fn test_records_stop_after_error() {
        let mut bytes = sample();
        bytes.truncate(bytes.len() - 2);
        let archive = KzipArchive::from(bytes);
        let items: Vec<_> = archive.records().unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1].as_ref().unwrap_err().file_index(), Some(2));
    }

    #[test]
    fn test_open_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&sample()).unwrap();

        let archive = KzipArchive::open(file.path(), &InspectConfig::default()).unwrap();
        assert_eq!(archive.header().unwrap().file_count, 2);
        assert_eq!(archive.toc().unwrap().count(), 2);
    }

    #[test]
    fn test_open_respects_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&sample()).unwrap();

        let config = InspectConfig::default().with_max_archive_size(16);
        let err = KzipArchive::open(file.path(), &config).unwrap_err();
        assert!(matches!(err, KzipError::ArchiveTooLarge { max: 16, .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let err = KzipArchive::open("/nonexistent/archive.kzip", &InspectConfig::default())
            .unwrap_err();
        assert!(matches!(err, KzipError::Io(_)));
    }

    #[test]
    fn test_inspect_is_idempotent() {
        let archive = KzipArchive::from_bytes(sample());
        let config = InspectConfig::default();
        assert_eq!(
            archive.inspect(&config).unwrap(),
            archive.inspect(&config).unwrap()
        );
    }
}
