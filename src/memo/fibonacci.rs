use crate::cache::splay::SplayCache;
use crate::cache::Cache;
use crate::error::{CacheError, Result};

/// Largest `n` whose Fibonacci number fits in a `u128`.
pub const MAX_FIBONACCI_N: u64 = 186;

fn add(n: u64, a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or(CacheError::FibonacciOverflow { n })
}

/// Fibonacci by plain recursion, exponential in `n`. Baseline for timing the caches.
pub fn naive_fibonacci(n: u64) -> Result<u128> {
    if n < 2 {
        return Ok(n as u128);
    }
    add(n, naive_fibonacci(n - 1)?, naive_fibonacci(n - 2)?)
}

/// Fibonacci memoized through any [`Cache`], storing the computed value for each `n`.
///
/// Example:
/// ```
/// use memocache::memo::fibonacci::fibonacci;
/// use memocache::LRUCache;
///
/// let cache = LRUCache::new(100).unwrap();
/// assert_eq!(fibonacci(90, &cache).unwrap(), 2_880_067_194_370_816_120);
/// ```
pub fn fibonacci<C: Cache<u64, u128> + ?Sized>(n: u64, cache: &C) -> Result<u128> {
    if n < 2 {
        return Ok(n as u128);
    }
    if let Some(value) = cache.get(&n) {
        return Ok(*value);
    }
    let result = add(n, fibonacci(n - 1, cache)?, fibonacci(n - 2, cache)?)?;
    cache.set(n, result);
    Ok(result)
}

/// Fibonacci "memoized" through a [`SplayCache`] that only records which `n` were seen.
///
/// A hit returns the key itself, not F(n): the tree is a seen-before set, not a value store.
/// The first cold computation is right up to `n = 3`; past that, reused subproblems feed their
/// marker back into the sum and the result diverges from the true sequence. Use [`fibonacci`]
/// for correct values.
pub fn splay_fibonacci(n: u64, tree: &SplayCache<u64>) -> Result<u128> {
    if let Some(marker) = tree.find(&n) {
        return Ok(marker as u128);
    }
    let result = if n <= 1 {
        n as u128
    } else {
        add(n, splay_fibonacci(n - 1, tree)?, splay_fibonacci(n - 2, tree)?)?
    };
    tree.insert(n);
    Ok(result)
}
