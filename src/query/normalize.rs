/// Queries shorter than this (after trimming) are not searched
pub const MIN_QUERY_CHARS: usize = 2;

/// A query reduced to the form every comparison works on: trimmed,
/// lower-cased, and split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedQuery {
    /// The whole query, trimmed and lower-cased
    pub normalized: String,
    /// Whitespace-separated terms of `normalized`, in order
    pub terms: Vec<String>,
}

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let terms = normalized.split_whitespace().map(str::to_string).collect();
        Self { normalized, terms }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether the query is long enough to be worth scoring
    pub fn is_searchable(&self) -> bool {
        self.normalized.chars().count() >= MIN_QUERY_CHARS
    }

    /// Terms used for per-term highlighting; single characters are dropped
    pub fn highlight_terms(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .map(String::as_str)
            .filter(|t| t.chars().count() > 1)
    }
}

/// Whether `raw` is long enough to trigger a search
pub fn is_searchable(raw: &str) -> bool {
    raw.trim().chars().count() >= MIN_QUERY_CHARS
}
