//! Random range-sum workloads for comparing the cached and uncached paths.

use crate::cache::Cache;
use crate::config::WorkloadConfig;
use crate::error::Result;
use crate::memo::range_sum::{uncached_sum, uncached_update, RangeKey, RangeSum};
use rand::seq::index;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Inclusive range sum with `left < right`.
    Range { left: usize, right: usize },
    Update { index: usize, value: i64 },
}

/// Array of `config.array_len` values drawn from `1..=config.max_value`.
pub fn generate_array<R: Rng + ?Sized>(rng: &mut R, config: &WorkloadConfig) -> Result<Vec<i64>> {
    config.validate()?;
    Ok((0..config.array_len)
        .map(|_| rng.random_range(1..=config.max_value))
        .collect())
}

/// `config.queries` queries, each a range with probability `config.range_ratio`, otherwise an update.
pub fn generate_queries<R: Rng + ?Sized>(rng: &mut R, config: &WorkloadConfig) -> Result<Vec<Query>> {
    config.validate()?;
    let queries = (0..config.queries)
        .map(|_| {
            if rng.random_bool(config.range_ratio) {
                let bounds = index::sample(&mut *rng, config.array_len, 2);
                let (a, b) = (bounds.index(0), bounds.index(1));
                Query::Range {
                    left: a.min(b),
                    right: a.max(b),
                }
            } else {
                Query::Update {
                    index: rng.random_range(0..config.array_len),
                    value: rng.random_range(1..=config.max_value),
                }
            }
        })
        .collect::<Vec<_>>();
    debug!(count = queries.len(), "generated range-sum workload");
    Ok(queries)
}

/// Run `queries` directly against `values`, returning a wrapping checksum of every range result.
pub fn replay_uncached(values: &mut [i64], queries: &[Query]) -> Result<i64> {
    let mut checksum = 0i64;
    for query in queries {
        match *query {
            Query::Range { left, right } => {
                checksum = checksum.wrapping_add(uncached_sum(values, left, right)?);
            }
            Query::Update { index, value } => uncached_update(values, index, value)?,
        }
    }
    Ok(checksum)
}

/// Run `queries` through a cached [`RangeSum`], returning the same checksum as [`replay_uncached`].
pub fn replay_cached<C: Cache<RangeKey, i64>>(ranges: &mut RangeSum<C>, queries: &[Query]) -> Result<i64> {
    let mut checksum = 0i64;
    for query in queries {
        match *query {
            Query::Range { left, right } => {
                checksum = checksum.wrapping_add(ranges.sum(left, right)?);
            }
            Query::Update { index, value } => ranges.update(index, value)?,
        }
    }
    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CacheError, LRUCache};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> WorkloadConfig {
        WorkloadConfig {
            array_len: 50,
            queries: 500,
            range_ratio: 0.7,
            max_value: 1000,
            cache_capacity: 16,
        }
    }

    #[test]
    fn test_generated_queries_are_in_bounds() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(7);
        let queries = generate_queries(&mut rng, &config).unwrap();
        assert_eq!(queries.len(), 500);
        for query in &queries {
            match *query {
                Query::Range { left, right } => {
                    assert!(left < right);
                    assert!(right < config.array_len);
                }
                Query::Update { index, value } => {
                    assert!(index < config.array_len);
                    assert!((1..=config.max_value).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_range_ratio_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let all_ranges = WorkloadConfig {
            range_ratio: 1.0,
            ..small_config()
        };
        let queries = generate_queries(&mut rng, &all_ranges).unwrap();
        assert!(queries.iter().all(|q| matches!(q, Query::Range { .. })));

        let all_updates = WorkloadConfig {
            range_ratio: 0.0,
            ..small_config()
        };
        let queries = generate_queries(&mut rng, &all_updates).unwrap();
        assert!(queries.iter().all(|q| matches!(q, Query::Update { .. })));
    }

    #[test]
    fn test_generate_array_values() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(3);
        let values = generate_array(&mut rng, &config).unwrap();
        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|v| (1..=1000).contains(v)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = WorkloadConfig {
            array_len: 1,
            ..small_config()
        };
        assert!(generate_queries(&mut rng, &config).is_err());
    }

    #[test]
    fn test_replay_with_huge_values_reports_overflow() {
        let config = WorkloadConfig {
            array_len: 4,
            queries: 50,
            range_ratio: 1.0,
            max_value: i64::MAX,
            cache_capacity: 4,
        };
        assert!(config.validate().is_ok());
        let mut values = vec![i64::MAX; 4];
        let queries = vec![Query::Range { left: 0, right: 3 }];

        let mut ranges = RangeSum::new(values.clone(), LRUCache::new(config.cache_capacity).unwrap());
        assert_eq!(
            replay_cached(&mut ranges, &queries),
            Err(CacheError::SumOverflow { left: 0, right: 3 })
        );
        assert_eq!(
            replay_uncached(&mut values, &queries),
            Err(CacheError::SumOverflow { left: 0, right: 3 })
        );
    }

    #[test]
    fn test_cached_replay_matches_uncached() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(42);
        let values = generate_array(&mut rng, &config).unwrap();
        let queries = generate_queries(&mut rng, &config).unwrap();

        let mut plain = values.clone();
        let expected = replay_uncached(&mut plain, &queries).unwrap();

        let cache = LRUCache::new(config.cache_capacity).unwrap();
        let mut ranges = RangeSum::new(values, cache);
        assert_eq!(replay_cached(&mut ranges, &queries).unwrap(), expected);
        assert_eq!(ranges.values(), plain.as_slice());
    }
}
