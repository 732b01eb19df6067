pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod workload;

pub use crate::cache::lru::LRUCache;
pub use crate::cache::splay::{SplayCache, SplayTree};
pub use crate::cache::unbounded::UnboundedCache;
pub use crate::cache::Cache;
pub use crate::config::WorkloadConfig;
pub use crate::error::{CacheError, Result};
