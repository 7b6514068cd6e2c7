use crate::index::ScoredResult;

/// What a result activation passes to the page it navigates to: the term to
/// highlight and the fragment to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub search_term: String,
    /// Fragment including `#`, or empty
    pub search_anchor: String,
}

impl Handoff {
    /// The matched keyword is preferred over the raw query as the term
    pub fn from_result(result: &ScoredResult, raw_query: &str) -> Self {
        let search_term = if result.matched_keyword.is_empty() {
            raw_query.to_string()
        } else {
            result.matched_keyword.clone()
        };
        Self {
            search_term,
            search_anchor: result.entry.anchor.clone(),
        }
    }
}

/// A request to show `target` (`/path` or `/path#fragment`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    pub handoff: Option<Handoff>,
}

impl Navigation {
    /// Plain navigation, e.g. from the sidebar
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            handoff: None,
        }
    }

    /// Navigation produced by activating a search result
    pub fn from_result(result: &ScoredResult, raw_query: &str) -> Self {
        Self {
            target: result.entry.target(),
            handoff: Some(Handoff::from_result(result, raw_query)),
        }
    }
}
