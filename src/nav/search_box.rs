//! The navbar search box: query text, ranked results and the dropdown.

use crate::index::{DocIndex, ScoredResult};
use crate::nav::handoff::Navigation;
use crate::query::{NormalizedQuery, Scorer, is_searchable};
use lru::LruCache;
use std::num::NonZeroUsize;

/// LRU cache size for search results, keyed by normalized query
const SEARCH_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(64).unwrap();

/// Visible state of the results dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownState {
    Closed,
    OpenWithResults,
    OpenNoResults,
}

/// Keys the search box reacts to while its dropdown is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Down,
    Up,
    Enter,
    Escape,
}

pub struct SearchBox {
    index: DocIndex,
    scorer: Scorer,
    cache: LruCache<String, Vec<ScoredResult>>,
    query: String,
    results: Vec<ScoredResult>,
    open: bool,
    /// `None` means no row is selected
    selected: Option<usize>,
    /// Whether the current results came from the cache
    cached: bool,
}

impl SearchBox {
    pub fn new(index: DocIndex, scorer: Scorer) -> Self {
        Self {
            index,
            scorer,
            cache: LruCache::new(SEARCH_CACHE_SIZE),
            query: String::new(),
            results: Vec::new(),
            open: false,
            selected: None,
            cached: false,
        }
    }

    pub fn index(&self) -> &DocIndex {
        &self.index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[ScoredResult] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }

    pub fn state(&self) -> DropdownState {
        match (self.open, self.results.is_empty()) {
            (false, _) => DropdownState::Closed,
            (true, true) => DropdownState::OpenNoResults,
            (true, false) => DropdownState::OpenWithResults,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replace the query text and re-run the search
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    /// Delete the last word of the query (Ctrl+W)
    pub fn delete_word(&mut self) {
        while self.query.ends_with(' ') {
            self.query.pop();
        }
        while !self.query.is_empty() && !self.query.ends_with(' ') {
            self.query.pop();
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.selected = None;
        self.cached = false;

        if !is_searchable(&self.query) {
            self.results.clear();
            self.open = false;
            return;
        }

        let key = NormalizedQuery::new(&self.query).normalized;
        if let Some(hit) = self.cache.get(&key) {
            self.results = hit.clone();
            self.cached = true;
        } else {
            self.results = self.scorer.search(&self.query, self.index.entries());
            self.cache.put(key, self.results.clone());
        }
        self.open = true;
    }

    /// Handle a navigation key. Returns the navigation when a result was
    /// activated.
    pub fn handle_key(&mut self, key: SearchKey) -> Option<Navigation> {
        match (key, self.state()) {
            (SearchKey::Escape, DropdownState::OpenWithResults | DropdownState::OpenNoResults) => {
                self.open = false;
                self.selected = None;
                None
            }
            (_, DropdownState::OpenWithResults) => match key {
                SearchKey::Down => {
                    let last = self.results.len() - 1;
                    self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                    None
                }
                SearchKey::Up => {
                    self.selected = self.selected.and_then(|i| i.checked_sub(1));
                    None
                }
                SearchKey::Enter => self.activate(self.selected.unwrap_or(0)),
                SearchKey::Escape => None,
            },
            _ => None,
        }
    }

    /// Activate result `idx`: build its navigation and reset the box
    pub fn activate(&mut self, idx: usize) -> Option<Navigation> {
        let result = self.results.get(idx)?;
        let navigation = Navigation::from_result(result, &self.query);
        tracing::debug!(
            query = %self.query,
            target = %navigation.target,
            rank = idx,
            "activated search result"
        );

        self.query.clear();
        self.results.clear();
        self.open = false;
        self.selected = None;
        self.cached = false;
        Some(navigation)
    }

    /// Close the dropdown after interaction elsewhere; the query is kept
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Input regained focus: reopen if the query is searchable
    pub fn focus(&mut self) {
        if is_searchable(&self.query) {
            self.open = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_box() -> SearchBox {
        SearchBox::new(DocIndex::builtin().unwrap(), Scorer::with_defaults())
    }

    #[test]
    fn test_short_query_closes() {
        let mut sb = search_box();
        sb.set_query("c");
        assert_eq!(sb.state(), DropdownState::Closed);
        assert!(sb.results().is_empty());

        sb.set_query("cr");
        assert_eq!(sb.state(), DropdownState::OpenWithResults);

        sb.pop_char();
        assert_eq!(sb.state(), DropdownState::Closed);
        assert!(sb.results().is_empty());
    }

    #[test]
    fn test_no_results_state() {
        let mut sb = search_box();
        sb.set_query("zzqx");
        assert_eq!(sb.state(), DropdownState::OpenNoResults);

        assert_eq!(sb.handle_key(SearchKey::Enter), None);
        assert_eq!(sb.handle_key(SearchKey::Escape), None);
        assert_eq!(sb.state(), DropdownState::Closed);
        assert_eq!(sb.query(), "zzqx");
    }

    #[test]
    fn test_selection_clamped() {
        let mut sb = search_box();
        sb.set_query("async");
        let n = sb.results().len();
        assert!(n > 1);
        assert_eq!(sb.selected(), None);

        sb.handle_key(SearchKey::Up);
        assert_eq!(sb.selected(), None);

        for _ in 0..n + 3 {
            sb.handle_key(SearchKey::Down);
        }
        assert_eq!(sb.selected(), Some(n - 1));

        for _ in 0..n + 3 {
            sb.handle_key(SearchKey::Up);
        }
        assert_eq!(sb.selected(), None);
    }

    #[test]
    fn test_typing_resets_selection() {
        let mut sb = search_box();
        sb.set_query("asyn");
        sb.handle_key(SearchKey::Down);
        sb.handle_key(SearchKey::Down);
        assert_eq!(sb.selected(), Some(1));

        sb.push_char('c');
        assert_eq!(sb.selected(), None);
    }

    #[test]
    fn test_enter_without_selection_takes_first() {
        let mut sb = search_box();
        sb.set_query("crawl website");
        let first = sb.results()[0].entry.target();

        let nav = sb.handle_key(SearchKey::Enter).unwrap();
        assert_eq!(nav.target, first);
        assert_eq!(sb.query(), "");
        assert!(sb.results().is_empty());
        assert_eq!(sb.state(), DropdownState::Closed);
        assert_eq!(sb.selected(), None);
    }

    #[test]
    fn test_enter_with_selection() {
        let mut sb = search_box();
        sb.set_query("async");
        sb.handle_key(SearchKey::Down);
        sb.handle_key(SearchKey::Down);
        let second = sb.results()[1].entry.target();

        let nav = sb.handle_key(SearchKey::Enter).unwrap();
        assert_eq!(nav.target, second);
    }

    #[test]
    fn test_escape_keeps_query() {
        let mut sb = search_box();
        sb.set_query("crawl");
        sb.handle_key(SearchKey::Down);
        sb.handle_key(SearchKey::Escape);
        assert_eq!(sb.state(), DropdownState::Closed);
        assert_eq!(sb.selected(), None);
        assert_eq!(sb.query(), "crawl");
        assert_eq!(sb.handle_key(SearchKey::Enter), None);
    }

    #[test]
    fn test_dismiss_and_focus() {
        let mut sb = search_box();
        sb.set_query("crawl");
        sb.dismiss();
        assert_eq!(sb.state(), DropdownState::Closed);
        assert_eq!(sb.query(), "crawl");

        sb.focus();
        assert_eq!(sb.state(), DropdownState::OpenWithResults);

        sb.set_query("c");
        sb.focus();
        assert_eq!(sb.state(), DropdownState::Closed);
    }

    #[test]
    fn test_cache_hit_on_same_normalized_query() {
        let mut sb = search_box();
        sb.set_query("Crawl");
        assert!(!sb.is_cached());
        let first = sb.results().to_vec();

        sb.set_query("  crawl ");
        assert!(sb.is_cached());
        assert_eq!(sb.results(), first.as_slice());
    }

    #[test]
    fn test_delete_word() {
        let mut sb = search_box();
        sb.set_query("crawl website ");
        sb.delete_word();
        assert_eq!(sb.query(), "crawl ");
        sb.delete_word();
        assert_eq!(sb.query(), "");
        assert_eq!(sb.state(), DropdownState::Closed);
    }
}
