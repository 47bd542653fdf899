use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chunkstream::source::ChunkedSource;
use chunkstream::{BinaryStream, WindowedStream};

const FILE_SIZE: usize = 16 * 1024 * 1024;
const CHUNK_SIZE: usize = 1024 * 1024;

/// (name, max window)
const WINDOW_SIZES: &[(&str, usize)] = &[
    ("window-4K", 4 * 1024),
    ("window-1M", 1024 * 1024),
    ("window-64M", 64 * 1024 * 1024),
];

fn make_source() -> ChunkedSource {
    let data: Vec<u8> = (0..FILE_SIZE).map(|i| (i % 251) as u8).collect();
    ChunkedSource::from_bytes(data, CHUNK_SIZE).unwrap()
}

/// Header-style parsing: many small field reads.
fn read_fields(source: &ChunkedSource, max_window: usize) -> u64 {
    let mut stream = WindowedStream::with_max_window(source.clone(), max_window);
    let mut sum = 0u64;
    while stream.remaining() >= 8 {
        sum += u32::from_le_bytes(stream.read_array().unwrap()) as u64;
        sum += stream.byte().unwrap() as u64;
        stream.skip(3).unwrap();
    }
    sum
}

/// Payload-style parsing: a short header followed by a large sub-stream.
fn read_payloads(source: &ChunkedSource, max_window: usize) -> usize {
    let mut stream = WindowedStream::with_max_window(source.clone(), max_window);
    let mut total = 0;
    while stream.remaining() >= 4 * 1024 * 1024 {
        stream.skip(16).unwrap();
        let mut payload = stream.stream(4 * 1024 * 1024 - 16).unwrap();
        total += payload.read_to_end().unwrap().len();
    }
    total
}

fn small_reads(c: &mut Criterion) {
    let source = make_source();
    for (name, max_window) in WINDOW_SIZES {
        c.bench_function(&format!("fields/{name}"), |b| {
            b.iter(|| read_fields(black_box(&source), *max_window));
        });
    }
}

fn bulk_reads(c: &mut Criterion) {
    let source = make_source();
    for (name, max_window) in WINDOW_SIZES {
        c.bench_function(&format!("payloads/{name}"), |b| {
            b.iter(|| read_payloads(black_box(&source), *max_window));
        });
    }
}

criterion_group!(regression, small_reads);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = bulk_reads
}
criterion_main!(regression, reporting);
