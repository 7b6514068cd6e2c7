//! Performance benchmarks for search and highlighting
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use feather_docs::content::{Site, apply_highlights, clear_highlights};
use feather_docs::index::{DocIndex, IndexEntry};
use feather_docs::nav::SearchBox;
use feather_docs::query::Scorer;

const QUERIES: &[&str] = &[
    "crawl",
    "pydantic",
    "async",
    "crawl website",
    "google search tools",
    "nothing matches this",
];

/// The built-in index repeated to a larger size
fn large_index(copies: usize) -> Vec<IndexEntry> {
    let index = DocIndex::builtin().expect("built-in index");
    (0..copies)
        .flat_map(|n| {
            index.entries().iter().map(move |e| IndexEntry {
                id: format!("{}-{}", e.id, n),
                ..e.clone()
            })
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let index = DocIndex::builtin().expect("built-in index");
    let scorer = Scorer::with_defaults();

    let mut group = c.benchmark_group("scoring");
    for query in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, &q| {
            b.iter(|| scorer.search(black_box(q), index.entries()))
        });
    }
    group.finish();
}

fn bench_scoring_large(c: &mut Criterion) {
    let entries = large_index(40);
    let scorer = Scorer::with_defaults();

    c.bench_function("scoring_1k_entries", |b| {
        b.iter(|| scorer.search(black_box("crawl website"), &entries))
    });
}

fn bench_typing(c: &mut Criterion) {
    let index = DocIndex::builtin().expect("built-in index");

    // Each keystroke refreshes results; repeated prefixes hit the cache
    c.bench_function("typing_session", |b| {
        let mut search = SearchBox::new(index.clone(), Scorer::with_defaults());
        b.iter(|| {
            for ch in "crawl website".chars() {
                search.push_char(ch);
            }
            search.set_query("");
        })
    });
}

fn bench_highlight(c: &mut Criterion) {
    let mut site = Site::builtin();

    let mut group = c.benchmark_group("highlight");
    for (path, term) in [
        ("/native-tools", "crawl"),
        ("/", "agent"),
        ("/async-tools", "async search"),
    ] {
        group.bench_with_input(BenchmarkId::new(path, term), &term, |b, &term| {
            let region = &mut site.resolve_mut(path).region;
            b.iter(|| {
                apply_highlights(region, black_box(term));
                clear_highlights(region);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scoring,
    bench_scoring_large,
    bench_typing,
    bench_highlight,
);

criterion_main!(benches);
