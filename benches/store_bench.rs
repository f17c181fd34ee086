//! Benchmarks for bytelog store operations

use bytelog::Store;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;

const PAYLOAD_SIZES: &[usize] = &[64, 1024, 16 * 1024];

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for &size in PAYLOAD_SIZES {
        let payload = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            let temp_dir = TempDir::new().unwrap();
            let store = Store::open(temp_dir.path().join("bench.log")).unwrap();
            b.iter(|| store.append(payload).unwrap());
        });
    }
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    for &size in PAYLOAD_SIZES {
        let payload = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            let temp_dir = TempDir::new().unwrap();
            let store = Store::open(temp_dir.path().join("bench.log")).unwrap();

            // A spread of records so reads are not all the same position
            let positions: Vec<u64> = (0..128)
                .map(|_| store.append(payload).unwrap().1)
                .collect();

            let mut next = 0;
            b.iter(|| {
                let position = positions[next % positions.len()];
                next += 1;
                store.read(position).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_sequential_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let payload = vec![0x42u8; 256];

    group.bench_function("1024_records", |b| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("bench.log")).unwrap();
        for _ in 0..1024 {
            store.append(&payload).unwrap();
        }

        b.iter(|| store.scan().map(|r| r.unwrap().payload.len()).sum::<usize>());
    });
    group.finish();
}

criterion_group!(benches, bench_append, bench_read, bench_sequential_scan);
criterion_main!(benches);
