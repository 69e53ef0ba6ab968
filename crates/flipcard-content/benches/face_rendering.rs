//! Benchmarks for flashcard face rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flipcard_content::ContentRenderer;

/// Generate a face with `lines` lines mixing every micro-syntax.
fn generate_face(lines: usize) -> String {
    let mut text = String::with_capacity(lines * 80);
    for i in 0..lines {
        text.push_str(&format!(
            "Line {i} with $x_{i}^2$ and [[Topic {i}|topic]] and ![img|{i}](img{i}.png)\n"
        ));
        if i % 5 == 0 {
            text.push_str("$$\\sum_{k=0}^{n}\nk$$\n");
        }
    }
    text
}

fn bench_render_plain(c: &mut Criterion) {
    let renderer = ContentRenderer::default();
    c.bench_function("render_plain_face", |b| {
        b.iter(|| renderer.render("What is the capital of France?\nParis."));
    });
}

fn bench_render_mixed(c: &mut Criterion) {
    let renderer = ContentRenderer::default();
    let mut group = c.benchmark_group("render_mixed_face");

    for lines in [10, 100, 1000] {
        let text = generate_face(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| renderer.render(text));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_plain, bench_render_mixed);
criterion_main!(benches);
