//! Search term highlighting over a content region.
//!
//! Matching works on each prose leaf independently. The whole query is tried
//! first and, when found, only its first occurrence in that leaf is marked.
//! Otherwise every occurrence of every query term longer than one character
//! is marked, with overlapping matches merged so marks never nest.

use crate::content::page::{ContentRegion, Mark};
use crate::query::NormalizedQuery;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Case-insensitive literal matchers for one query
struct Matcher {
    full: Regex,
    terms: Vec<Regex>,
}

impl Matcher {
    fn new(query: &NormalizedQuery) -> Option<Self> {
        let full = literal_regex(&query.normalized)?;
        let terms = query.highlight_terms().filter_map(literal_regex).collect();
        Some(Self { full, terms })
    }

    fn leaf_ranges(&self, text: &str) -> Vec<Range<usize>> {
        if let Some(m) = self.full.find(text) {
            return vec![m.range()];
        }

        let mut ranges: Vec<Range<usize>> = self
            .terms
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.range()))
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if range.start < last.end => last.end = last.end.max(range.end),
                _ => merged.push(range),
            }
        }
        merged
    }
}

fn literal_regex(literal: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()
        .inspect_err(|e| tracing::warn!(error = %e, "cannot build highlight matcher"))
        .ok()
}

/// Compute the marks `query` would place on `region`, without applying them
pub fn find_marks(region: &ContentRegion, query: &str) -> Vec<Mark> {
    let query = NormalizedQuery::new(query);
    if query.is_empty() {
        return Vec::new();
    }
    let Some(matcher) = Matcher::new(&query) else {
        return Vec::new();
    };

    region
        .prose_leaves()
        .flat_map(|(id, leaf)| {
            matcher
                .leaf_ranges(&leaf.text)
                .into_iter()
                .map(move |range| Mark { leaf: id, range })
        })
        .collect()
}

/// Highlight `query` in `region`, replacing any previous highlights.
///
/// An empty or whitespace-only query leaves the region untouched. Returns the
/// number of marks placed.
pub fn apply_highlights(region: &mut ContentRegion, query: &str) -> usize {
    if query.trim().is_empty() {
        return 0;
    }

    let marks = find_marks(region, query);
    let count = marks.len();
    tracing::debug!(query, marks = count, "applied highlights");
    region.set_marks(marks);
    count
}

/// Remove every highlight from `region`; a no-op when there are none
pub fn clear_highlights(region: &mut ContentRegion) {
    if region.has_highlights() {
        tracing::trace!(marks = region.marks().len(), "cleared highlights");
        region.clear_marks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::page::{Block, BlockKind, InlineStyle, Leaf, LeafId};

    fn paragraph(texts: &[(&str, InlineStyle)]) -> Block {
        Block {
            kind: BlockKind::Paragraph,
            leaves: texts
                .iter()
                .map(|(t, s)| Leaf::new(s.clone(), *t))
                .collect(),
        }
    }

    fn marked_texts(region: &ContentRegion) -> Vec<String> {
        region
            .marks()
            .iter()
            .map(|m| region.leaf(m.leaf).unwrap().text[m.range.clone()].to_string())
            .collect()
    }

    #[test]
    fn test_full_query_marks_first_occurrence_only() {
        let mut region = ContentRegion::new(vec![paragraph(&[(
            "Web search, then more web search.",
            InlineStyle::Plain,
        )])]);

        apply_highlights(&mut region, "web search");
        assert_eq!(region.marks().len(), 1);
        assert_eq!(marked_texts(&region), vec!["Web search"]);
    }

    #[test]
    fn test_term_fallback_marks_every_occurrence() {
        let mut region = ContentRegion::new(vec![paragraph(&[(
            "Search the web. Web pages, search results.",
            InlineStyle::Plain,
        )])]);

        apply_highlights(&mut region, "web search");
        assert_eq!(
            marked_texts(&region),
            vec!["Search", "web", "Web", "search"]
        );
    }

    #[test]
    fn test_single_char_terms_ignored() {
        let mut region =
            ContentRegion::new(vec![paragraph(&[("a crawl of a site", InlineStyle::Plain)])]);

        apply_highlights(&mut region, "a website");
        assert!(!region.has_highlights());

        apply_highlights(&mut region, "a crawl zz");
        assert_eq!(marked_texts(&region), vec!["crawl"]);
    }

    #[test]
    fn test_overlapping_terms_merge() {
        let mut region =
            ContentRegion::new(vec![paragraph(&[("google_search_async", InlineStyle::Plain)])]);

        apply_highlights(&mut region, "search_async google_search zzz");
        assert_eq!(marked_texts(&region), vec!["google_search_async"]);
    }

    #[test]
    fn test_code_is_never_marked() {
        let mut region = ContentRegion::new(vec![
            paragraph(&[
                ("call ", InlineStyle::Plain),
                ("crawl", InlineStyle::Code),
                (" to crawl", InlineStyle::Plain),
            ]),
            Block {
                kind: BlockKind::CodeBlock { lang: None },
                leaves: vec![Leaf::new(InlineStyle::Code, "crawl(url)")],
            },
        ]);

        apply_highlights(&mut region, "crawl");
        assert_eq!(region.marks().len(), 1);
        assert_eq!(region.marks()[0].leaf, LeafId { block: 0, leaf: 2 });
    }

    #[test]
    fn test_reapply_replaces_marks() {
        let mut region =
            ContentRegion::new(vec![paragraph(&[("extract and crawl", InlineStyle::Plain)])]);

        apply_highlights(&mut region, "crawl");
        let once = region.clone();
        apply_highlights(&mut region, "crawl");
        assert_eq!(region, once);

        apply_highlights(&mut region, "extract");
        assert_eq!(marked_texts(&region), vec!["extract"]);
    }

    #[test]
    fn test_empty_query_is_noop() {
        let mut region =
            ContentRegion::new(vec![paragraph(&[("extract and crawl", InlineStyle::Plain)])]);
        apply_highlights(&mut region, "crawl");

        assert_eq!(apply_highlights(&mut region, "   "), 0);
        assert!(region.has_highlights());
    }

    #[test]
    fn test_clear_restores_region() {
        let mut region = ContentRegion::new(vec![paragraph(&[(
            "<b>crawl</b> & extract",
            InlineStyle::Plain,
        )])]);
        let before = region.clone();

        apply_highlights(&mut region, "crawl");
        assert_eq!(region.text_content(), before.text_content());

        clear_highlights(&mut region);
        assert_eq!(region, before);

        clear_highlights(&mut region);
        assert_eq!(region, before);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let mut region = ContentRegion::new(vec![paragraph(&[(
            "asyncio.gather() runs (things)",
            InlineStyle::Plain,
        )])]);

        apply_highlights(&mut region, "asyncio.gather()");
        assert_eq!(marked_texts(&region), vec!["asyncio.gather()"]);

        apply_highlights(&mut region, "a.c");
        assert!(!region.has_highlights());
    }
}
