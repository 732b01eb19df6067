use crate::cache::Cache;
use crate::error::{CacheError, Result};
use tracing::trace;

/// Cache key for the inclusive range `[left, right]`.
pub type RangeKey = (usize, usize);

fn check_range(len: usize, left: usize, right: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(CacheError::InvalidRange { left, right, len });
    }
    Ok(())
}

/// Inclusive sum of `values[left..=right]`, or `SumOverflow` if it leaves the `i64` range.
fn checked_range_sum(values: &[i64], left: usize, right: usize) -> Result<i64> {
    check_range(values.len(), left, right)?;
    values[left..=right]
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
        .ok_or(CacheError::SumOverflow { left, right })
}

/// Inclusive sum of `values[left..=right]` with no caching.
pub fn uncached_sum(values: &[i64], left: usize, right: usize) -> Result<i64> {
    checked_range_sum(values, left, right)
}

/// Bounds-checked write with no cache to invalidate.
pub fn uncached_update(values: &mut [i64], index: usize, value: i64) -> Result<()> {
    let len = values.len();
    let slot = values
        .get_mut(index)
        .ok_or(CacheError::IndexOutOfBounds { index, len })?;
    *slot = value;
    Ok(())
}

/// RangeSum answers inclusive range-sum queries over a mutable array, caching each result by its `(left, right)` bounds.
///
/// Any update drops the whole cache: a single write can change every cached range that covers it, and ranges are not tracked per index.
///
/// Example:
/// ```
/// use memocache::memo::range_sum::RangeSum;
/// use memocache::{Cache, LRUCache};
///
/// let mut ranges = RangeSum::new(vec![1, 2, 3, 4, 5], LRUCache::new(16).unwrap());
/// assert_eq!(ranges.sum(0, 2).unwrap(), 6);
/// assert_eq!(ranges.cache().get(&(0, 2)).map(|v| *v), Some(6));
///
/// ranges.update(0, 10).unwrap();
/// assert!(ranges.cache().get(&(0, 2)).is_none());
/// assert_eq!(ranges.sum(0, 2).unwrap(), 15);
/// ```
pub struct RangeSum<C> {
    values: Vec<i64>,
    cache: C,
}

impl<C: Cache<RangeKey, i64>> RangeSum<C> {
    pub fn new(values: Vec<i64>, cache: C) -> Self {
        RangeSum { values, cache }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Sum of `values[left..=right]`, served from the cache when present.
    pub fn sum(&self, left: usize, right: usize) -> Result<i64> {
        check_range(self.values.len(), left, right)?;
        if let Some(cached) = self.cache.get(&(left, right)) {
            return Ok(*cached);
        }
        let result = checked_range_sum(&self.values, left, right)?;
        self.cache.set((left, right), result);
        Ok(result)
    }

    /// Write `value` at `index`, then invalidate every cached range.
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        uncached_update(&mut self.values, index, value)?;
        trace!(index, "array mutated, invalidating range cache");
        self.cache.clear();
        Ok(())
    }
}
