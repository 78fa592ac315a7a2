//! Single-pass inspection pipeline.

use crate::InspectConfig;
use crate::Result;
use crate::formats::header::ArchiveHeader;
use crate::formats::record::FileRecord;
use crate::formats::toc::TocWalker;
use crate::inspection::report::ArchiveReport;
use crate::inspection::report::FileReport;
use crate::inspection::report::Span;
use crate::inspection::report::check_layout;
use crate::inspection::verify::verify_record;
use crate::source::ByteSource;

/// Decodes and verifies every record of an in-memory archive.
///
/// Runs header decode, then for each TOC entry in order: record decode and
/// checksum verification. The first structural error aborts the run and no
/// partial report is returned. Checksum mismatches are recorded in the
/// report and never abort.
///
/// # Errors
///
/// Returns `InvalidArchive`, `UnsupportedVersion`,
/// `UnsupportedCompression` or `TruncatedArchive`.
pub fn inspect_source(source: ByteSource<'_>, config: &InspectConfig) -> Result<ArchiveReport> {
    let header = ArchiveHeader::decode(&source)?;
    tracing::debug!(
        version = %header.version,
        compression = %header.compression,
        file_count = header.file_count,
        "decoded archive header"
    );

    let mut files = Vec::with_capacity(usize::from(header.file_count));
    let mut spans = Vec::new();

    for entry in TocWalker::new(source, &header) {
        let entry = entry?;
        let record = FileRecord::decode(&source, entry)?;
        tracing::debug!(
            index = entry.index,
            offset = entry.offset,
            name = %record.name,
            size = record.payload_size(),
            "decoded file record"
        );

        let verification = verify_record(&record);
        if config.check_layout {
            let (start, end) = record.span();
            spans.push(Span {
                index: entry.index,
                start,
                end,
            });
        }
        files.push(FileReport::new(&record, verification));
    }

    let layout_issues = if config.check_layout {
        check_layout(header.toc_end(), source.len(), &spans)
    } else {
        Vec::new()
    };
    for issue in &layout_issues {
        tracing::warn!(?issue, "unusual record layout");
    }

    Ok(ArchiveReport {
        header,
        archive_size: source.len(),
        files,
        layout_issues,
    })
}
