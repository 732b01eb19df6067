use memocache::memo::fibonacci::{fibonacci, naive_fibonacci, splay_fibonacci};
use memocache::{Cache, LRUCache, SplayCache, UnboundedCache};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = 35;

    // Measure naive Fibonacci time
    let (result_naive, duration_naive) = timed(|| naive_fibonacci(n));
    let result_naive = result_naive?;
    println!(
        "Naive Fibonacci({}) = {} (Time: {:?})",
        n, result_naive, duration_naive
    );

    // Measure LRU cached Fibonacci time
    let cache = LRUCache::new(100)?;
    let (result_cached, duration_cached) = timed(|| fibonacci(n, &cache));
    let result_cached = result_cached?;
    println!(
        "LRU Fibonacci({}) = {} (Time: {:?}, cached entries: {})",
        n,
        result_cached,
        duration_cached,
        cache.len()
    );
    assert_eq!(result_naive, result_cached);

    let speedup = duration_naive.as_secs_f64() / duration_cached.as_secs_f64();
    println!("Speedup: {:.2}x", speedup);

    // Compare the strategies across a sweep of n, five runs each
    println!();
    println!("{:<10}{:<25}{:<25}", "n", "Unbounded Time (s)", "Splay Tree Time (s)");
    println!("{}", "-".repeat(60));
    for n in (0..=180).step_by(20) {
        let unbounded = UnboundedCache::new();
        let tree = SplayCache::new();

        let mut unbounded_time = Duration::ZERO;
        let mut splay_time = Duration::ZERO;
        for _ in 0..5 {
            let (result, elapsed) = timed(|| fibonacci(n, &unbounded));
            result?;
            unbounded_time += elapsed;
            let (result, elapsed) = timed(|| splay_fibonacci(n, &tree));
            result?;
            splay_time += elapsed;
        }
        println!(
            "{:<10}{:<25.8}{:<25.8}",
            n,
            unbounded_time.as_secs_f64(),
            splay_time.as_secs_f64()
        );
    }
    Ok(())
}
