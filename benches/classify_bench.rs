use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabletalk::intent::IntentClassifier;

fn classify_benchmark(c: &mut Criterion) {
    let classifier = IntentClassifier::default();
    let commands = [
        "show statistics",
        "could you please show correlation heatmap for the numeric columns",
        "this matches nothing at all in the keyword table",
        "",
    ];

    c.bench_function("classify_mixed_commands", |b| {
        b.iter(|| {
            for command in &commands {
                black_box(classifier.classify(black_box(command)));
            }
        })
    });
}

criterion_group!(benches, classify_benchmark);
criterion_main!(benches);
