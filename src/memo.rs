//! Memoized computations built on the caches.
//!
//! Each caller owns or borrows an explicit cache instance; nothing here keeps
//! process-wide state.

pub mod fibonacci;
pub mod range_sum;
