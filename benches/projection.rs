//! Benchmarks for tree building and projection.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vj::document::{Document, decode};
use vj::search::build_matches;
use vj::tree::{CollapseState, ValueTree};

fn large_json(records: usize) -> String {
    let items: Vec<String> = (0..records)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "name": "user {i}", "tags": ["a", "b", "c"], "meta": {{"active": {}, "score": {}.5}}}}"#,
                i % 2 == 0,
                i % 100
            )
        })
        .collect();
    format!(r#"{{"users": [{}]}}"#, items.join(","))
}

fn bench_decode_and_build(c: &mut Criterion) {
    let json = large_json(2_000);
    c.bench_function("decode_and_build", |b| {
        b.iter(|| {
            let value = decode(black_box(json.as_bytes())).unwrap();
            ValueTree::build(&value)
        })
    });
}

fn bench_project_expanded(c: &mut Criterion) {
    let value = decode(large_json(2_000).as_bytes()).unwrap();
    let tree = ValueTree::build(&value);
    let collapsed = CollapseState::new();
    c.bench_function("project_expanded", |b| {
        b.iter(|| vj::projection::project(black_box(&tree), black_box(&collapsed)))
    });
}

fn bench_fold_toggle(c: &mut Criterion) {
    let mut doc = Document::from_json_str(&large_json(2_000)).unwrap();
    c.bench_function("fold_toggle", |b| {
        b.iter(|| {
            doc.collapse(black_box("users[1000]"));
            doc.expand(black_box("users[1000]"));
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let doc = Document::from_json_str(&large_json(2_000)).unwrap();
    c.bench_function("search_build", |b| {
        b.iter(|| build_matches(doc.lines(), black_box("user 19")))
    });
}

criterion_group!(
    benches,
    bench_decode_and_build,
    bench_project_expanded,
    bench_fold_toggle,
    bench_search
);
criterion_main!(benches);
