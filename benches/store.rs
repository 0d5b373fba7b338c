//! 短码存储性能基准测试

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use codelink::storage::{CodeStore, StoreBackend, create_store};

const BACKENDS: [StoreBackend; 2] = [StoreBackend::Memory, StoreBackend::Sharded];

fn filled_store(backend: StoreBackend, entries: usize) -> Arc<dyn CodeStore> {
    let store = create_store(backend, entries);
    for i in 0..entries {
        store.put(&format!("code{:06}", i), &format!("https://example.com/{}", i));
    }
    store
}

// ============== 单线程读写 ==============

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/get");

    for backend in BACKENDS {
        let store = filled_store(backend, 10_000);
        group.bench_function(BenchmarkId::new("hit", backend), |b| {
            b.iter(|| store.get(black_box("code005000")));
        });
        group.bench_function(BenchmarkId::new("miss", backend), |b| {
            b.iter(|| store.get(black_box("nonexistent")));
        });
    }

    group.finish();
}

fn bench_insert_if_absent(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/insert_if_absent");

    for backend in BACKENDS {
        group.throughput(Throughput::Elements(1000));
        group.bench_function(BenchmarkId::new("fresh", backend), |b| {
            b.iter_batched(
                || create_store(backend, 1000),
                |store| {
                    for i in 0..1000 {
                        store.insert_if_absent(&format!("code{:06}", i), "https://example.com");
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============== 读多写少并发 ==============

/// 每个写线程对应三个读线程
fn bench_mixed_concurrency(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/mixed");

    for backend in BACKENDS {
        for num_threads in [4, 8] {
            group.throughput(Throughput::Elements((num_threads * 500) as u64));
            group.bench_with_input(
                BenchmarkId::new(backend.to_string(), num_threads),
                &num_threads,
                |b, &num_threads| {
                    b.iter_batched(
                        || filled_store(backend, 1000),
                        |store| {
                            std::thread::scope(|s| {
                                for t in 0..num_threads {
                                    let store = Arc::clone(&store);
                                    s.spawn(move || {
                                        for i in 0..500 {
                                            if t % 4 == 0 {
                                                store.put(
                                                    &format!("w{}-{}", t, i),
                                                    "https://example.com",
                                                );
                                            } else {
                                                black_box(store.get(&format!("code{:06}", i)));
                                            }
                                        }
                                    });
                                }
                            });
                        },
                        criterion::BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_get, bench_insert_if_absent, bench_mixed_concurrency);
criterion_main!(benches);
