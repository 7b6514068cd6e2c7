//! Heading discovery and the on-page outline.

use crate::content::page::{Block, BlockKind, ContentRegion};
use regex::Regex;
use std::sync::LazyLock;

/// Outline is only worth showing with at least this many entries
pub const MIN_OUTLINE_ENTRIES: usize = 2;

/// Heading level listed in the outline
const OUTLINE_LEVEL: u8 = 2;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Derive a heading id: lower-case, runs of anything outside `[a-z0-9]`
/// collapsed to `-`, no leading or trailing `-`
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_SLUG
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Give every heading without an explicit id a slug of its text.
///
/// Returns how many ids were assigned.
pub fn assign_heading_ids(blocks: &mut [Block]) -> usize {
    let mut assigned = 0;
    for block in blocks.iter_mut() {
        let text = block.text();
        if let BlockKind::Heading { id, .. } = &mut block.kind
            && id.is_empty()
        {
            *id = slugify(&text);
            assigned += 1;
        }
    }
    assigned
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub id: String,
    pub text: String,
    /// Index of the heading block in its region
    pub block: usize,
}

/// Level-2 headings of `region`, in document order
pub fn outline(region: &ContentRegion) -> Vec<OutlineEntry> {
    region
        .blocks()
        .iter()
        .enumerate()
        .filter_map(|(i, block)| match &block.kind {
            BlockKind::Heading { level, id } if *level == OUTLINE_LEVEL => Some(OutlineEntry {
                id: id.clone(),
                text: block.text(),
                block: i,
            }),
            _ => None,
        })
        .collect()
}

/// Whether an outline should be displayed at all
pub fn should_show(outline: &[OutlineEntry]) -> bool {
    outline.len() >= MIN_OUTLINE_ENTRIES
}

/// The entry whose section contains `top_block`: the last one starting at or
/// above it
pub fn active_entry(outline: &[OutlineEntry], top_block: usize) -> Option<usize> {
    outline.iter().rposition(|e| e.block <= top_block)
}
