//! Structured inspection results.
//!
//! Everything here is plain data: sizes in bytes, timestamps in Unix
//! seconds, checksums as raw byte arrays. Rendering is left to the caller.

use chrono::DateTime;
use chrono::Local;
use chrono::Utc;

use crate::formats::header::ArchiveHeader;
use crate::formats::record::FileRecord;
use crate::formats::record::timestamp_utc;
use crate::inspection::verify::VerificationResult;

/// Decoded metadata and verification verdicts for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// 1-based TOC position.
    pub index: usize,
    /// Absolute record offset from the TOC.
    pub offset: u64,
    /// File name.
    pub name: String,
    /// Subdirectory; empty for the archive root.
    pub directory: String,
    /// Modification time in Unix seconds.
    pub timestamp: u32,
    /// Stored CRC32, byte reversal already applied.
    pub stored_crc32: [u8; 4],
    /// Stored MD5 digest.
    pub stored_md5: [u8; 16],
    /// Raw payload length field (payload size minus one).
    pub payload_length_field: u64,
    /// Payload size in bytes.
    pub payload_size: u64,
    /// Checksum verdicts.
    pub verification: VerificationResult,
}

impl FileReport {
    /// Builds a report from a decoded record and its verification result.
    #[must_use]
    pub fn new(record: &FileRecord<'_>, verification: VerificationResult) -> Self {
        Self {
            index: record.entry.index,
            offset: record.entry.offset,
            name: record.name.clone(),
            directory: record.directory.clone(),
            timestamp: record.timestamp,
            stored_crc32: record.crc32,
            stored_md5: record.md5,
            payload_length_field: record.payload_length_field,
            payload_size: record.payload_size(),
            verification,
        }
    }

    /// Returns `true` if both checksums match.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    /// Returns `true` if the file lives in the archive root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.directory.is_empty()
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

/// A suspicious record layout. Reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutIssue {
    /// Record offset is lower than the previous TOC entry's offset.
    OutOfOrder {
        /// 1-based index of the record.
        index: usize,
        /// Its offset.
        offset: u64,
        /// Offset of the preceding TOC entry.
        previous_offset: u64,
    },
    /// Record region intersects another record's region.
    Overlap {
        /// 1-based index of the record.
        index: usize,
        /// 1-based index of the record it overlaps.
        other_index: usize,
    },
    /// Record starts inside the header or TOC.
    OverlapsToc {
        /// 1-based index of the record.
        index: usize,
        /// Its offset.
        offset: u64,
        /// End of the TOC region.
        toc_end: u64,
    },
    /// Bytes after the furthest record that no record covers.
    TrailingBytes {
        /// First uncovered byte.
        offset: u64,
        /// Number of uncovered bytes.
        len: u64,
    },
}

impl LayoutIssue {
    /// 1-based index of the record involved, if the issue concerns one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::OutOfOrder { index, .. }
            | Self::Overlap { index, .. }
            | Self::OverlapsToc { index, .. } => Some(*index),
            Self::TrailingBytes { .. } => None,
        }
    }
}

/// Full result of inspecting an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Decoded header.
    pub header: ArchiveHeader,
    /// Archive size in bytes.
    pub archive_size: u64,
    /// Per-file results in TOC order.
    pub files: Vec<FileReport>,
    /// Layout findings, empty when layout checks are disabled.
    pub layout_issues: Vec<LayoutIssue>,
}

impl ArchiveReport {
    /// Sum of all payload sizes.
    #[must_use]
    pub fn total_payload_size(&self) -> u64 {
        self.files
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.payload_size))
    }

    /// Returns `true` if every file passed both checksum checks.
    #[must_use]
    pub fn all_verified(&self) -> bool {
        self.files.iter().all(FileReport::is_verified)
    }

    /// Files with at least one checksum mismatch.
    pub fn mismatches(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.is_verified())
    }

    /// Returns `true` if any layout issue was found.
    #[must_use]
    pub fn has_layout_issues(&self) -> bool {
        !self.layout_issues.is_empty()
    }
}

/// Record region used for layout analysis.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Span {
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

/// Collects layout findings for records given in TOC order.
pub(crate) fn check_layout(toc_end: u64, archive_size: u64, spans: &[Span]) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();

    for (i, span) in spans.iter().enumerate() {
        if span.start < toc_end {
            issues.push(LayoutIssue::OverlapsToc {
                index: span.index,
                offset: span.start,
                toc_end,
            });
        }
        if let Some(previous) = i.checked_sub(1).map(|p| spans[p])
            && span.start < previous.start
        {
            issues.push(LayoutIssue::OutOfOrder {
                index: span.index,
                offset: span.start,
                previous_offset: previous.start,
            });
        }
    }

    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| (s.start, s.index));
    let mut furthest: Option<Span> = None;
    for span in &sorted {
        if let Some(prev) = furthest {
            if span.start < prev.end {
                issues.push(LayoutIssue::Overlap {
                    index: span.index,
                    other_index: prev.index,
                });
            }
            if span.end > prev.end {
                furthest = Some(*span);
            }
        } else {
            furthest = Some(*span);
        }
    }

    let covered = furthest.map_or(toc_end, |s| s.end.max(toc_end));
    if archive_size > covered {
        issues.push(LayoutIssue::TrailingBytes {
            offset: covered,
            len: archive_size - covered,
        });
    }

    issues
}
