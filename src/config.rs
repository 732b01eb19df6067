//! Workload configuration for the range-sum driver.

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};

/// Shape of a generated range-sum workload and the cache it runs against.
///
/// Missing fields fall back to [`WorkloadConfig::default`], so a partial JSON
/// document such as `{"queries": 1000}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Length of the array being queried.
    pub array_len: usize,
    /// Number of queries to generate.
    pub queries: usize,
    /// Probability that a generated query is a range sum rather than an update.
    pub range_ratio: f64,
    /// Array elements and update values are drawn from `1..=max_value`.
    pub max_value: i64,
    /// Capacity of the LRU cache in front of the array.
    pub cache_capacity: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            array_len: 100_000,
            queries: 50_000,
            range_ratio: 0.7,
            max_value: 1000,
            cache_capacity: 5000,
        }
    }
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.array_len < 2 {
            return Err(CacheError::invalid_config(
                "array_len must be at least 2 to draw distinct range bounds",
            ));
        }
        if !(0.0..=1.0).contains(&self.range_ratio) {
            return Err(CacheError::invalid_config(format!(
                "range_ratio must be within [0, 1], got {}",
                self.range_ratio
            )));
        }
        if self.max_value < 1 {
            return Err(CacheError::invalid_config("max_value must be at least 1"));
        }
        if self.cache_capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(())
    }
}
