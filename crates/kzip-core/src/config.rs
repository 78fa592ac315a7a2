//! Inspection configuration.

/// Default upper bound on the archive size loaded into memory (4 GiB).
pub const DEFAULT_MAX_ARCHIVE_SIZE: u64 = 4 * 1024 * 1024 * 1024;

/// Configuration for archive inspection.
///
/// # Examples
///
/// ```
/// use kzip_core::InspectConfig;
///
/// // Use defaults
/// let config = InspectConfig::default();
/// assert!(config.check_layout);
///
/// // Customize
/// let custom = InspectConfig::default()
///     .with_max_archive_size(64 * 1024 * 1024)
///     .with_check_layout(false);
/// assert_eq!(custom.max_archive_size, 64 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    /// Largest archive file, in bytes, that will be loaded into memory.
    pub max_archive_size: u64,

    /// Report out-of-order, overlapping and trailing record layouts.
    ///
    /// Layout findings never abort inspection.
    pub check_layout: bool,
}

impl Default for InspectConfig {
    /// Creates an `InspectConfig` with default settings.
    ///
    /// Default values:
    /// - `max_archive_size`: 4 GiB
    /// - `check_layout`: true
    fn default() -> Self {
        Self {
            max_archive_size: DEFAULT_MAX_ARCHIVE_SIZE,
            check_layout: true,
        }
    }
}

impl InspectConfig {
    /// Sets the archive size limit.
    #[must_use]
    pub const fn with_max_archive_size(mut self, max: u64) -> Self {
        self.max_archive_size = max;
        self
    }

    /// Enables or disables layout diagnostics.
    #[must_use]
    pub const fn with_check_layout(mut self, enabled: bool) -> Self {
        self.check_layout = enabled;
        self
    }
}
