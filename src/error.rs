//! Error types for memocache
//!
//! A cache miss is never an error; lookups return `Option`. These variants
//! cover misconfiguration and invalid caller input only.

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache capacity must be greater than zero")]
    InvalidCapacity,
    #[error("range [{left}, {right}] is invalid for an array of length {len}")]
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
    #[error("sum over range [{left}, {right}] overflows a 64-bit integer")]
    SumOverflow { left: usize, right: usize },
    #[error("index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("fibonacci({n}) does not fit in a 128-bit integer")]
    FibonacciOverflow { n: u64 },
    #[error("invalid workload configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Create a new InvalidConfig error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity.to_string(),
            "cache capacity must be greater than zero"
        );
        assert_eq!(
            CacheError::InvalidRange {
                left: 3,
                right: 1,
                len: 5
            }
            .to_string(),
            "range [3, 1] is invalid for an array of length 5"
        );
        assert_eq!(
            CacheError::invalid_config("queries must be positive").to_string(),
            "invalid workload configuration: queries must be positive"
        );
    }
}
