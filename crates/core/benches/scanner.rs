use criterion::{Criterion, criterion_group, criterion_main};
use devtodo_core::language::Language;
use devtodo_core::{LineResolution, ScanOptions, find_comments};
use std::hint::black_box;

fn sample_source() -> String {
    let unit = "fn main() {\n    let s = \"not // a comment\";\n    // TODO: handle errors\n    /*\n     * FIXME: tidy\n     */\n}\n";
    unit.repeat(500)
}

fn benchmark_scan(c: &mut Criterion) {
    let source = sample_source();
    let profile = Language::Rust.profile();
    c.bench_function("find_comments_tracked", |b| {
        b.iter(|| {
            let records = find_comments(
                black_box(&source),
                profile,
                ScanOptions::default(),
                LineResolution::Tracked,
            )
            .unwrap();
            black_box(records);
        })
    });
}

criterion_group!(benches, benchmark_scan);
criterion_main!(benches);
