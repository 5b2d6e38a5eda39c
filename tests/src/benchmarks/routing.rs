//! # Routing Table Benchmarks
//!
//! Conditions:
//! - Full table (256 buckets, every reachable bucket at capacity)
//! - Adversarial ids clustered next to the lookup target
//! - Lookups racing updates from other threads

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use peer_routing::{bucket_for_peer, xor_bytes, Identity, RoutingTable};

fn random_identity(port: u32) -> Identity {
    let key: [u8; 32] = rand::random();
    Identity::new(format!("10.0.{}.{}:{}", port / 256 % 256, port % 256, 4000), key.to_vec())
}

/// Ids sharing every byte with `target` except the last `spread`.
fn clustered_identities(target: &Identity, count: usize, spread: usize) -> Vec<Identity> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let mut id = target.id().to_vec();
            for byte in id.iter_mut().skip(32 - spread) {
                *byte = rng.gen();
            }
            Identity::from_parts(format!("10.1.0.{}:4000", i % 256), id.clone(), id)
        })
        .collect()
}

fn filled_table(peers: usize) -> RoutingTable {
    let table = RoutingTable::new(random_identity(0));
    for port in 1..=peers as u32 {
        table.update(&random_identity(port));
    }
    table
}

pub fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing/distance");
    group.measurement_time(Duration::from_secs(5));

    let a = [0xAAu8; 32];
    let b = [0x55u8; 32];
    group.bench_function("xor_256bit", |bench| bench.iter(|| black_box(xor_bytes(&a, &b))));

    let local = [0u8; 32];
    let mut far = [0u8; 32];
    far[31] = 1;
    group.bench_function("bucket_for_peer_worst_case", |bench| {
        bench.iter(|| black_box(bucket_for_peer(&local, &far)))
    });

    group.finish();
}

pub fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing/update");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000, 5_000] {
        let table = filled_table(size);
        let known = table.get_peers();
        let fresh: Vec<Identity> = (0..1024).map(random_identity).collect();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("refresh_known", size), &known, |bench, known| {
            let mut i = 0;
            bench.iter(|| {
                table.update(&known[i % known.len()]);
                i += 1;
            })
        });
        group.bench_with_input(BenchmarkId::new("insert_or_reject", size), &fresh, |bench, fresh| {
            let mut i = 0;
            bench.iter(|| {
                table.update(&fresh[i % fresh.len()]);
                i += 1;
            })
        });
    }

    group.finish();
}

pub fn bench_find_closest(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing/find_closest");
    group.measurement_time(Duration::from_secs(10));

    for size in [100usize, 1_000, 5_000] {
        let table = filled_table(size);
        let target = random_identity(u32::MAX);
        group.bench_with_input(BenchmarkId::new("random_target_k16", size), &size, |bench, _| {
            bench.iter(|| black_box(table.find_closest_peers(&target, 16)))
        });
    }

    // Every peer crowds the target's neighbourhood.
    let table = filled_table(0);
    let target = random_identity(1);
    for peer in clustered_identities(&target, 2_000, 2) {
        table.update(&peer);
    }
    group.bench_function("clustered_target_k16", |bench| {
        bench.iter(|| black_box(table.find_closest_peers(&target, 16)))
    });

    group.finish();
}

pub fn bench_contended_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing/contended");
    group.measurement_time(Duration::from_secs(10));

    let table = Arc::new(filled_table(2_000));
    let target = random_identity(u32::MAX);

    group.bench_function("find_closest_with_4_writers", |bench| {
        bench.iter_custom(|iters| {
            let writers: Vec<_> = (0..4)
                .map(|w| {
                    let table = Arc::clone(&table);
                    thread::spawn(move || {
                        for i in 0..iters.min(10_000) as u32 {
                            table.update(&random_identity(w * 100_000 + i));
                        }
                    })
                })
                .collect();

            let start = std::time::Instant::now();
            for _ in 0..iters {
                black_box(table.find_closest_peers(&target, 16));
            }
            let elapsed = start.elapsed();

            for writer in writers {
                let _ = writer.join();
            }
            elapsed
        })
    });

    group.finish();
}
