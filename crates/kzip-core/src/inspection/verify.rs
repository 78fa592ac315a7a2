//! Payload integrity verification.

use md5::Digest;
use md5::Md5;

use crate::formats::record::FileRecord;

/// Outcome of checking one payload against its stored checksums.
///
/// Both verdicts are computed independently; a CRC32 mismatch never
/// short-circuits the MD5 check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerificationResult {
    /// CRC32 of the payload as little-endian bytes.
    pub computed_crc32: [u8; 4],
    /// MD5 digest of the payload.
    pub computed_md5: [u8; 16],
    /// `true` if the computed CRC32 equals the stored (reversed) CRC32.
    pub crc32_matches: bool,
    /// `true` if the computed MD5 equals the stored MD5.
    pub md5_matches: bool,
}

impl VerificationResult {
    /// Returns `true` if both checksums match.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.crc32_matches && self.md5_matches
    }
}

/// Computes the CRC32 of `data` in the byte order records report it.
#[must_use]
pub fn crc32_bytes(data: &[u8]) -> [u8; 4] {
    crc32fast::hash(data).to_le_bytes()
}

/// Computes the MD5 digest of `data`.
#[must_use]
pub fn md5_bytes(data: &[u8]) -> [u8; 16] {
    let digest = Md5::digest(data);
    let mut out = [0u8; 16];
    out.copy_from_slice(&digest);
    out
}

/// Checks `payload` against a stored CRC32 (already byte-reversed) and MD5.
///
/// # Examples
///
/// ```
/// use kzip_core::verify_payload;
/// use kzip_core::inspection::verify::crc32_bytes;
/// use kzip_core::inspection::verify::md5_bytes;
///
/// let result = verify_payload(b"abc", crc32_bytes(b"abc"), md5_bytes(b"abc"));
/// assert!(result.is_verified());
///
/// let result = verify_payload(b"abd", crc32_bytes(b"abc"), md5_bytes(b"abc"));
/// assert!(!result.crc32_matches && !result.md5_matches);
/// ```
#[must_use]
pub fn verify_payload(payload: &[u8], stored_crc32: [u8; 4], stored_md5: [u8; 16]) -> VerificationResult {
    let computed_crc32 = crc32_bytes(payload);
    let computed_md5 = md5_bytes(payload);
    VerificationResult {
        computed_crc32,
        computed_md5,
        crc32_matches: computed_crc32 == stored_crc32,
        md5_matches: computed_md5 == stored_md5,
    }
}

/// Verifies a decoded record's payload against its own stored checksums.
#[must_use]
pub fn verify_record(record: &FileRecord<'_>) -> VerificationResult {
    let result = verify_payload(record.payload, record.crc32, record.md5);
    if !result.is_verified() {
        tracing::warn!(
            index = record.entry.index,
            name = %record.name,
            crc32_matches = result.crc32_matches,
            md5_matches = result.md5_matches,
            "checksum mismatch"
        );
    }
    result
}
