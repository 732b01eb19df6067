use memocache::memo::range_sum::RangeSum;
use memocache::workload::{generate_array, generate_queries, replay_cached, replay_uncached};
use memocache::{LRUCache, WorkloadConfig};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Usage: `cargo run --example range_sum [config.json]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str::<WorkloadConfig>(&std::fs::read_to_string(path)?)?,
        None => WorkloadConfig::default(),
    };
    config.validate()?;
    info!(?config, "running range-sum workload");

    let mut rng = rand::rng();
    let values = generate_array(&mut rng, &config)?;
    let queries = generate_queries(&mut rng, &config)?;

    let mut plain = values.clone();
    let start = Instant::now();
    let expected = replay_uncached(&mut plain, &queries)?;
    let no_cache_time = start.elapsed();

    let mut ranges = RangeSum::new(values, LRUCache::new(config.cache_capacity)?);
    let start = Instant::now();
    let cached = replay_cached(&mut ranges, &queries)?;
    let cache_time = start.elapsed();

    assert_eq!(expected, cached);
    println!("[*] Execution time without caching: {:.2} seconds", no_cache_time.as_secs_f64());
    println!("[*] Execution time with LRU cache: {:.2} seconds", cache_time.as_secs_f64());
    Ok(())
}
