//! Facade overhead: fingerprinting, cached hits and cold computations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fincalc_cache::{fingerprint, CacheConfig, CacheFacade, MemoryCache, NoopCache};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn bench_fingerprint(c: &mut Criterion) {
    c.bench_function("fingerprint_five_args", |b| {
        b.iter(|| {
            fingerprint!(
                "fuel",
                "earnings_projection",
                black_box(350.0),
                black_box(220.0),
                black_box(5.89),
                black_box(11.5),
                black_box(6_u8)
            )
        });
    });
}

fn bench_get_or_compute(c: &mut Criterion) {
    let Ok(rt) = Runtime::new() else {
        return;
    };
    let config = CacheConfig::default();
    let Ok(memory) = MemoryCache::new(&config) else {
        return;
    };
    let cached = CacheFacade::new(Arc::new(memory), &config);
    let uncached = CacheFacade::new(Arc::new(NoopCache::new()), &config);
    let key = fingerprint!("loan", "monthly_payment", 250_000.0, 4.5, 30_u32);

    c.bench_function("facade_hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                let value: f64 = cached
                    .get_or_compute(&key, None, || Ok(black_box(1_266.71)))
                    .await
                    .unwrap_or_default();
                black_box(value)
            })
        });
    });

    c.bench_function("facade_disabled", |b| {
        b.iter(|| {
            rt.block_on(async {
                let value: f64 = uncached
                    .get_or_compute(&key, None, || Ok(black_box(1_266.71)))
                    .await
                    .unwrap_or_default();
                black_box(value)
            })
        });
    });
}

criterion_group!(benches, bench_fingerprint, bench_get_or_compute);
criterion_main!(benches);
