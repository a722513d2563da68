use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sheet_pulse_core::{aggregate, classify};
use sheet_pulse_render::layout_radial;

fn responses(n: usize, distinct: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 7 {
            0 => String::new(),
            1 => format!("  answer {}  ", i % distinct),
            _ => format!("answer {}", i % distinct),
        })
        .collect()
}

fn bench_analysis(c: &mut Criterion) {
    let categorical = responses(5_000, 6);
    let free_text = responses(5_000, 2_500);

    c.bench_function("classify_categorical_5k", |b| {
        b.iter(|| classify(black_box(&categorical)))
    });
    c.bench_function("aggregate_free_text_5k", |b| {
        b.iter(|| aggregate(black_box(&free_text)))
    });

    let entries = aggregate(&free_text);
    c.bench_function("layout_radial_2500", |b| {
        b.iter(|| layout_radial(black_box(&entries)))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
