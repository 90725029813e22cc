//! Performance benchmarks for clockwork-base32
//!
//! This benchmark suite evaluates:
//! - One-shot encode/decode throughput
//! - Lenient decoding (lowercase and aliased input)
//! - Streaming writer/reader throughput at different buffer sizes

use clockwork_base32::{
    ClockworkReader, ClockworkWriter, StreamConfig, decode, decode_string, encode, encode_to_string,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::{Read, Write};

/// Generate test data for benchmarking
mod test_data {
    /// Random data from a fixed-seed LCG
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }
}

const SIZES: [(&str, usize); 3] = [("1KB", 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, size) in SIZES {
        let data = test_data::random(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("bytes", name), &data, |b, data| {
            b.iter(|| black_box(encode(black_box(data))));
        });
        group.bench_with_input(BenchmarkId::new("string", name), &data, |b, data| {
            b.iter(|| black_box(encode_to_string(black_box(data))));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, size) in SIZES {
        let canonical = encode_to_string(test_data::random(size));
        // Lowercase with look-alikes exercises the alias entries of the table
        let lenient = canonical
            .to_ascii_lowercase()
            .replace('0', "o")
            .replace('1', "l");
        group.throughput(Throughput::Bytes(canonical.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("canonical", name),
            &canonical,
            |b, text| {
                b.iter(|| black_box(decode_string(black_box(text)).unwrap()));
            },
        );
        group.bench_with_input(BenchmarkId::new("lenient", name), &lenient, |b, text| {
            b.iter(|| black_box(decode(black_box(text)).unwrap()));
        });
    }

    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");

    let size = 1024 * 1024;
    let data = test_data::random(size);
    let encoded = encode(&data);
    let configs = [
        ("small", StreamConfig::SMALL),
        ("default", StreamConfig::DEFAULT),
        ("64KB", StreamConfig::new(64 * 1024, 64 * 1024)),
    ];

    for (name, config) in configs {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("writer", name), &data, |b, data| {
            b.iter(|| {
                let sink = Vec::with_capacity(encoded.len());
                let mut writer = ClockworkWriter::with_config(sink, config);
                // Odd chunk size keeps a partial quantum carried between writes
                for chunk in data.chunks(4099) {
                    writer.write_all(chunk).unwrap();
                }
                writer.finish().unwrap();
                black_box(writer.into_inner());
            });
        });

        group.bench_with_input(BenchmarkId::new("reader", name), &encoded, |b, encoded| {
            b.iter(|| {
                let mut reader = ClockworkReader::with_config(&encoded[..], config);
                let mut decoded = Vec::with_capacity(size);
                reader.read_to_end(&mut decoded).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_streaming);
criterion_main!(benches);
