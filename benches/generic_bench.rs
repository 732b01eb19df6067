use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memocache::memo::fibonacci::{fibonacci, splay_fibonacci};
use memocache::memo::range_sum::RangeSum;
use memocache::workload::{generate_array, generate_queries, replay_cached, replay_uncached};
use memocache::{Cache, LRUCache, SplayCache, UnboundedCache, WorkloadConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_fibonacci(c: &mut Criterion) {
    // A list of (label, factory) pairs, where 'factory' creates a fresh cache each time.
    let cache_factories: Vec<(&'static str, Box<dyn Fn() -> Box<dyn Cache<u64, u128>>>)> = vec![
        ("LRU", Box::new(|| Box::new(LRUCache::new(200).unwrap()))),
        ("UNBOUNDED", Box::new(|| Box::new(UnboundedCache::new()))),
    ];

    for n in [50u64, 100, 150] {
        for (label, factory) in &cache_factories {
            c.bench_function(&format!("fib_{}_{}", label, n), |b| {
                b.iter(|| {
                    let cache = factory();
                    black_box(fibonacci(black_box(n), cache.as_ref()).unwrap());
                })
            });
        }

        c.bench_function(&format!("fib_SPLAY_{}", n), |b| {
            b.iter(|| {
                let tree = SplayCache::new();
                black_box(splay_fibonacci(black_box(n), &tree).unwrap());
            })
        });
    }
}

fn bench_range_sum(c: &mut Criterion) {
    let config = WorkloadConfig {
        array_len: 10_000,
        queries: 5_000,
        cache_capacity: 500,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let values = generate_array(&mut rng, &config).unwrap();
    let queries = generate_queries(&mut rng, &config).unwrap();

    c.bench_function("range_sum_uncached", |b| {
        b.iter(|| {
            let mut values = values.clone();
            black_box(replay_uncached(&mut values, &queries).unwrap());
        })
    });

    c.bench_function("range_sum_lru", |b| {
        b.iter(|| {
            let cache = LRUCache::new(config.cache_capacity).unwrap();
            let mut ranges = RangeSum::new(values.clone(), cache);
            black_box(replay_cached(&mut ranges, &queries).unwrap());
        })
    });
}

criterion_group!(benches, bench_fibonacci, bench_range_sum);
criterion_main!(benches);
