//! Scoring module for search results
//!
//! Ranks index entries against a free-text query with a purely additive score.
//! Every signal is independent: an entry matching the title, a keyword and the
//! searchable text collects all three bonuses.

use crate::index::{IndexEntry, ScoredResult};
use crate::query::keyword::pick_keyword;
use crate::query::normalize::NormalizedQuery;
use serde::{Deserialize, Serialize};

/// Maximum number of results returned by a search
pub const MAX_RESULTS: usize = 10;

/// Weights for each scoring signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Title equals the whole query
    pub title_exact: u32,
    /// Title contains the whole query
    pub title_contains: u32,
    /// Section contains the whole query
    pub section_contains: u32,
    /// Per term found in the title
    pub title_term: u32,
    /// Per term found in the section
    pub section_term: u32,
    /// Keyword equals the whole query
    pub keyword_exact: u32,
    /// Keyword contains the whole query (only when not exact)
    pub keyword_contains: u32,
    /// Per (keyword, term) pair where the keyword contains the term
    pub keyword_term: u32,
    /// Searchable text contains the whole query
    pub text_contains: u32,
    /// Per term found in the searchable text
    pub text_term: u32,
    /// Category contains the whole query
    pub category_contains: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_exact: 100,
            title_contains: 50,
            section_contains: 60,
            title_term: 20,
            section_term: 25,
            keyword_exact: 70,
            keyword_contains: 40,
            keyword_term: 15,
            text_contains: 20,
            text_term: 8,
            category_contains: 15,
        }
    }
}

/// Scorer calculates relevance scores for index entries
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Get the weights (for external calculations)
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Calculate the total score of one entry
    pub fn score_entry(&self, entry: &IndexEntry, query: &NormalizedQuery) -> u32 {
        let w = &self.weights;
        let q = query.normalized.as_str();
        let mut score = 0;

        let title = entry.title.to_lowercase();
        let section = entry.section.as_deref().map(str::to_lowercase);

        if title == q {
            score += w.title_exact;
        }
        if title.contains(q) {
            score += w.title_contains;
        }
        if section.as_deref().is_some_and(|s| s.contains(q)) {
            score += w.section_contains;
        }

        for term in &query.terms {
            if title.contains(term.as_str()) {
                score += w.title_term;
            }
            if section.as_deref().is_some_and(|s| s.contains(term.as_str())) {
                score += w.section_term;
            }
        }

        for keyword in &entry.keywords {
            let keyword = keyword.to_lowercase();
            if keyword == q {
                score += w.keyword_exact;
            } else if keyword.contains(q) {
                score += w.keyword_contains;
            }

            for term in &query.terms {
                if keyword.contains(term.as_str()) {
                    score += w.keyword_term;
                }
            }
        }

        let text = entry.searchable_text.to_lowercase();
        if text.contains(q) {
            score += w.text_contains;
        }
        for term in &query.terms {
            if text.contains(term.as_str()) {
                score += w.text_term;
            }
        }

        if entry.category.to_lowercase().contains(q) {
            score += w.category_contains;
        }

        score
    }

    /// Rank `entries` against `query`.
    ///
    /// Returns at most [`MAX_RESULTS`] entries with a non-zero score, highest
    /// first. Equal scores keep their index order. Queries shorter than two
    /// characters return nothing.
    pub fn search(&self, query: &str, entries: &[IndexEntry]) -> Vec<ScoredResult> {
        let query = NormalizedQuery::new(query);
        if !query.is_searchable() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, u32)> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, self.score_entry(entry, &query)))
            .filter(|&(_, score)| score > 0)
            .collect();

        let hits = scored.len();

        // sort_by is stable, so ties stay in index order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(MAX_RESULTS);

        tracing::trace!(
            query = %query.normalized,
            candidates = entries.len(),
            hits,
            "scored query"
        );

        scored
            .into_iter()
            .map(|(i, score)| {
                let entry = &entries[i];
                let matched_keyword =
                    pick_keyword(&entry.keywords, &query.normalized, &query.terms).to_string();
                ScoredResult {
                    entry: entry.clone(),
                    score,
                    matched_keyword,
                }
            })
            .collect()
    }
}

/// Rank `entries` against `query` with the default weights
pub fn search(query: &str, entries: &[IndexEntry]) -> Vec<ScoredResult> {
    Scorer::with_defaults().search(query, entries)
}
