//! # Wire Benchmarks
//!
//! Frame encode and decode across payload sizes up to the 4 MB ceiling.

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};

use peer_routing::{
    decode_frame, encode_frame, FrameConfig, Identity, LookupNodeResponse, Message, Ping,
};

fn sender() -> Identity {
    Identity::new("127.0.0.1:3000", vec![7u8; 32])
}

pub fn bench_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire/framing");
    group.measurement_time(Duration::from_secs(5));
    let config = FrameConfig::default();

    for size in [0usize, 1_024, 64 * 1_024, 1_000_000, 3_900_000] {
        let mut message = Message::request(sender(), 1, &Ping).unwrap();
        message.body = vec![0xAB; size];
        let frame = encode_frame(&message, &config).unwrap();

        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &message, |bench, message| {
            bench.iter(|| black_box(encode_frame(message, &config)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &frame, |bench, frame| {
            bench.iter(|| black_box(decode_frame(frame, &config)))
        });
    }

    group.finish();
}

pub fn bench_lookup_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire/lookup_response");
    let peers: Vec<Identity> = (0..16u8)
        .map(|i| Identity::new(format!("10.0.0.{i}:4000"), vec![i; 32]))
        .collect();
    let request = Message::request(sender(), 1, &Ping).unwrap();

    group.bench_function("build_reply_16_peers", |bench| {
        bench.iter(|| {
            black_box(Message::reply(
                sender(),
                2,
                &request,
                &LookupNodeResponse {
                    peers: peers.clone(),
                },
            ))
        })
    });

    group.finish();
}
