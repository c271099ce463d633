//! Configuration for line-aligned file splitting.

use crate::error::{SplitError, SplitResult};
use serde::{Deserialize, Serialize};

/// Default size of the scan buffer used while searching for a line terminator.
pub const DEFAULT_SCAN_BUFFER: usize = 1000;

/// Controls how a file is split into fragments.
///
/// The configuration is serde-friendly so it can live next to the rest of a
/// pipeline's settings (JSON, TOML, ...). Missing fields fall back to
/// [`SplitConfig::default`].
///
/// # Example
/// ```
/// use ironshard::SplitConfig;
///
/// let cfg = SplitConfig::default()
///     .with_partitions(8)
///     .with_terminator(b'\n');
/// assert_eq!(cfg.partitions, 8);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Desired number of fragments. The split may return fewer, never more.
    pub partitions: usize,
    /// Byte that ends a logical line. Fragment boundaries always follow it.
    pub terminator: u8,
    /// Size in bytes of the fixed buffer used to scan for the terminator.
    pub scan_buffer: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            partitions: num_cpus::get().max(1),
            terminator: b'\n',
            scan_buffer: DEFAULT_SCAN_BUFFER,
        }
    }
}

impl SplitConfig {
    /// Set the desired number of fragments.
    #[must_use]
    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    #[must_use]
    pub fn with_scan_buffer(mut self, scan_buffer: usize) -> Self {
        self.scan_buffer = scan_buffer;
        self
    }

    /// Check the settings before any file is touched.
    ///
    /// # Errors
    /// Returns [`SplitError::InvalidArgument`] if `partitions` or `scan_buffer` is zero.
    pub fn validate(&self) -> SplitResult<()> {
        if self.partitions == 0 {
            return Err(SplitError::InvalidArgument(
                "partition count must be positive".into(),
            ));
        }
        if self.scan_buffer == 0 {
            return Err(SplitError::InvalidArgument(
                "scan buffer size must be positive".into(),
            ));
        }
        Ok(())
    }
}
