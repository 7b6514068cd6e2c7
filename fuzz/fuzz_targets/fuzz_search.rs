#![no_main]

use feather_docs::index::DocIndex;
use feather_docs::query::{MAX_RESULTS, search};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static INDEX: OnceLock<DocIndex> = OnceLock::new();

fuzz_target!(|data: &str| {
    // Scoring arbitrary queries must not panic and must respect the result cap
    let index = INDEX.get_or_init(|| DocIndex::builtin().unwrap());
    let results = search(data, index.entries());
    assert!(results.len() <= MAX_RESULTS);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
});
