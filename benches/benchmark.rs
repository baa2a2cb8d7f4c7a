// Throughput benchmarks for the windowed graph and the record codecs
use bytes::BytesMut;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use tagdegree::codec::{binary, text};
use tagdegree::{BinaryReader, IndexedQueue, ProcessorConfig, Record, WindowedGraph};

/// A mostly ordered stream of records over `tags` distinct hashtags.
fn generate_records(count: usize, tags: i64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut clock = 0i64;
    let mut records = Vec::with_capacity(count);
    while records.len() < count {
        clock += rng.random_range(0..3);
        let timestamp = if rng.random_bool(0.1) {
            clock - rng.random_range(0..90)
        } else {
            clock
        };
        let nodes: Vec<i64> = (0..rng.random_range(2..6))
            .map(|_| rng.random_range(0..tags))
            .collect();
        if let Ok(record) = Record::new(timestamp, nodes) {
            records.push(record);
        }
    }
    records
}

fn benchmark_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for size in [1_000, 10_000, 100_000].iter() {
        let records = generate_records(*size, 5_000);
        group.bench_with_input(BenchmarkId::new("window_60", size), &records, |b, records| {
            b.iter(|| {
                let mut graph = WindowedGraph::new(ProcessorConfig::default()).unwrap();
                for record in records {
                    black_box(graph.process(record));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    group.bench_function("push_improve_pop_10k", |b| {
        b.iter(|| {
            let mut queue = IndexedQueue::with_capacity(10_000);
            for i in 0..10_000u32 {
                queue.push(i, i64::from(i % 977));
            }
            for i in (0..10_000u32).step_by(3) {
                queue.improve(i, 2_000);
            }
            while let Some(entry) = queue.pop() {
                black_box(entry);
            }
        });
    });

    group.finish();
}

fn benchmark_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let records = generate_records(10_000, 5_000);

    let mut frames = BytesMut::new();
    for record in &records {
        binary::encode(record, &mut frames).unwrap();
    }
    let lines: Vec<String> = records.iter().map(text::format_record).collect();

    group.bench_function("binary_decode_10k", |b| {
        b.iter(|| {
            for record in BinaryReader::new(&frames[..]) {
                black_box(record.unwrap());
            }
        });
    });

    group.bench_function("text_parse_10k", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(text::parse_line(line).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_process, benchmark_queue, benchmark_codecs);
criterion_main!(benches);
