//! Benchmarks for code-point indexing and slicing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unitext::{Encoding, Pattern, Slice, Text};

fn sample_text(size: usize) -> String {
    // Mix of 1-, 2-, 3- and 4-byte code points
    let words = [
        "The quick brown fox ",
        "häßliche Füchse ",
        "東京の狐 ",
        "🦊🦊 ",
        "renard très rapide ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(words[i % words.len()]);
        i += 1;
    }
    text
}

fn bench_indexed_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_access");

    for size in [1_000, 10_000, 100_000] {
        let text = Text::new(sample_text(size));
        // Build the offset map outside the measured loop
        let _ = text.at(0);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("at", size), &text, |b, text| {
            b.iter(|| {
                for i in (0..text.len()).step_by(97) {
                    black_box(text.at(i as i64));
                }
            });
        });
    }

    group.finish();
}

fn bench_offset_map_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset_map_build");

    for size in [1_000, 10_000, 100_000] {
        let source = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("first_at", size), &source, |b, source| {
            b.iter(|| Text::new(black_box(source.as_str())).at(-1));
        });
    }

    group.finish();
}

fn bench_slice_notation(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_notation");

    for size in [1_000, 10_000, 100_000] {
        let text = Text::new(sample_text(size));
        let reverse = Slice::parse("::-1").unwrap();
        let stride = Slice::parse("1::3").unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("reverse", size), &text, |b, text| {
            b.iter(|| text.get_range(black_box(&reverse)));
        });
        group.bench_with_input(BenchmarkId::new("stride", size), &text, |b, text| {
            b.iter(|| text.get_range(black_box(&stride)));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000, 100_000] {
        let text = Text::new(sample_text(size));

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("last_index_of", size), &text, |b, text| {
            b.iter(|| text.last_index_of(black_box("狐")));
        });
    }

    group.finish();
}

fn bench_non_utf8_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_utf8_search");
    let sjis = Encoding::for_label("shift_jis").unwrap();
    let needle = Pattern::literal("狐");

    for size in [1_000, 10_000, 100_000] {
        // Only code points Shift_JIS can store
        let source = "東京の狐 quick fox ".repeat(size / 24 + 1);
        let text = Text::of(source, sjis);
        let _ = text.index_of("狐");

        group.throughput(Throughput::Bytes(text.size() as u64));
        group.bench_with_input(BenchmarkId::new("match_all", size), &text, |b, text| {
            b.iter(|| text.match_all(black_box(&needle)));
        });
        group.bench_with_input(BenchmarkId::new("last_index_of", size), &text, |b, text| {
            b.iter(|| text.last_index_of(black_box("狐")));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_indexed_access,
    bench_offset_map_build,
    bench_slice_notation,
    bench_search,
    bench_non_utf8_search
);
criterion_main!(benches);
