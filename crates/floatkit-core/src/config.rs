//! Per-instance configuration for vectors and hash tables.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Element count below which a growable vector doubles its capacity.
pub const DEFAULT_DOUBLING_THRESHOLD: usize = 1024 * 1024;

/// Elements added per growth step once the doubling threshold is reached.
pub const DEFAULT_FIXED_INCREMENT: usize = 1024 * 1024;

/// Bucket count of a freshly created hash table.
pub const DEFAULT_INITIAL_BUCKETS: usize = 16;

/// Ratio of entries to buckets above which a table doubles.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;

/// Seed mixed into every key hash.
pub const DEFAULT_HASH_SEED: u32 = 0x045d_9f3b;

/// Capacity growth rule for growable vectors.
///
/// Capacity doubles while it is below `doubling_threshold`, then grows by
/// `fixed_increment` per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPolicy {
    /// Capacity (in elements) under which growth doubles.
    pub doubling_threshold: usize,
    /// Elements added per step at or above the threshold.
    pub fixed_increment: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            doubling_threshold: DEFAULT_DOUBLING_THRESHOLD,
            fixed_increment: DEFAULT_FIXED_INCREMENT,
        }
    }
}

impl GrowthPolicy {
    /// Check that the policy always makes progress.
    pub fn validate(&self) -> Result<()> {
        if self.fixed_increment == 0 {
            return Err(Error::InvalidArgument("growth increment must be non-zero"));
        }
        Ok(())
    }

    /// Capacity that follows `current` under this policy.
    ///
    /// Returns `None` if the next capacity does not fit in `usize`.
    #[must_use]
    pub fn next_capacity(&self, current: usize) -> Option<usize> {
        let current = current.max(1);
        if current < self.doubling_threshold {
            current.checked_mul(2)
        } else {
            current.checked_add(self.fixed_increment)
        }
    }
}

/// Shape and hashing parameters of a chained hash table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Bucket count at creation. Must be a non-zero power of two.
    pub initial_buckets: usize,
    /// Resize trigger: the table doubles once `entries / buckets` exceeds it.
    pub load_factor: f64,
    /// Seed for the key hash.
    pub seed: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            load_factor: DEFAULT_LOAD_FACTOR,
            seed: DEFAULT_HASH_SEED,
        }
    }
}

impl TableConfig {
    /// Check the bucket count and load factor.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_buckets.is_power_of_two() {
            return Err(Error::InvalidArgument(
                "initial bucket count must be a non-zero power of two",
            ));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 || self.load_factor > 1.0 {
            return Err(Error::InvalidArgument("load factor must be in (0, 1]"));
        }
        Ok(())
    }

    /// Whether `entries` spread over `buckets` exceeds the load factor.
    #[inline]
    #[must_use]
    pub fn is_overloaded(&self, entries: usize, buckets: usize) -> bool {
        entries as f64 / buckets as f64 > self.load_factor
    }
}
