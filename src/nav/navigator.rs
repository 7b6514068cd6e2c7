//! Page navigation and arrival processing.
//!
//! The navigator owns the site and the current route. A navigation clears the
//! highlights of the page being left and stores the request's handoff. Once
//! the new page reports its first render, the handoff is consumed: the term is
//! highlighted and a scroll target is produced, either the anchored heading
//! right away or the first mark after the settle delay.

use crate::content::highlight::{apply_highlights, clear_highlights};
use crate::content::site::{HOME, Page, Site, split_target};
use crate::nav::handoff::{Handoff, Navigation};
use std::time::{Duration, Instant};

/// Pause before scrolling to the first mark
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollReason {
    /// Heading named by a search result's anchor; shown centered
    Anchor,
    /// First highlight, when the anchor did not resolve
    FirstMark,
    /// Heading named by the URL fragment of a plain navigation
    Fragment,
}

/// Block of the current page the view should scroll to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTarget {
    pub block: usize,
    pub reason: ScrollReason,
}

pub struct Navigator {
    site: Site,
    route: String,
    fragment: Option<String>,
    pending: Option<Handoff>,
    settle: Duration,
    scroll_deadline: Option<Instant>,
    awaiting_render: bool,
}

impl Navigator {
    /// Start on the home page
    pub fn new(site: Site, settle: Duration) -> Self {
        Self {
            site,
            route: HOME.to_string(),
            fragment: None,
            pending: None,
            settle,
            scroll_deadline: None,
            awaiting_render: true,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn current_page(&self) -> &Page {
        self.site.resolve(&self.route)
    }

    pub fn pending_handoff(&self) -> Option<&Handoff> {
        self.pending.as_ref()
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.scroll_deadline.is_some()
    }

    /// Go to `navigation.target`.
    ///
    /// The page being left loses its highlights and any scheduled scroll is
    /// cancelled. The request's handoff replaces whatever was pending.
    pub fn navigate(&mut self, navigation: Navigation) {
        clear_highlights(&mut self.site.resolve_mut(&self.route).region);
        self.scroll_deadline = None;

        let (route, fragment) = split_target(&navigation.target);
        if !self.site.contains(route) {
            tracing::warn!(route, "no page for route");
        }
        tracing::debug!(
            from = %self.route,
            to = %navigation.target,
            handoff = navigation.handoff.is_some(),
            "navigate"
        );

        self.route = route.to_string();
        self.fragment = fragment.map(str::to_string);
        self.pending = navigation.handoff;
        self.awaiting_render = true;
    }

    /// Called after every completed render. Only the first render after a
    /// navigation does anything.
    pub fn on_render_complete(&mut self, now: Instant) -> Option<ScrollTarget> {
        if !self.awaiting_render {
            return None;
        }
        self.awaiting_render = false;

        let page = self.site.resolve_mut(&self.route);
        let Some(handoff) = self.pending.take() else {
            let block = page.region.find_anchor(self.fragment.as_deref()?)?;
            return Some(ScrollTarget {
                block,
                reason: ScrollReason::Fragment,
            });
        };

        let marks = apply_highlights(&mut page.region, &handoff.search_term);
        tracing::debug!(
            route = %self.route,
            term = %handoff.search_term,
            anchor = %handoff.search_anchor,
            marks,
            "processed search arrival"
        );

        if let Some(block) = page.region.find_anchor(&handoff.search_anchor) {
            return Some(ScrollTarget {
                block,
                reason: ScrollReason::Anchor,
            });
        }
        if !handoff.search_anchor.is_empty() {
            tracing::warn!(anchor = %handoff.search_anchor, "anchor not found on page");
        }

        if page.region.has_highlights() {
            self.scroll_deadline = Some(now + self.settle);
        }
        None
    }

    /// Time left before the scheduled scroll to the first mark
    pub fn time_until_scroll(&self, now: Instant) -> Option<Duration> {
        self.scroll_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the scheduled scroll to the first mark once its deadline passed
    pub fn poll_scroll(&mut self, now: Instant) -> Option<ScrollTarget> {
        let deadline = self.scroll_deadline?;
        if now < deadline {
            return None;
        }
        self.scroll_deadline = None;

        let mark = self.current_page().region.first_mark()?;
        Some(ScrollTarget {
            block: mark.leaf.block,
            reason: ScrollReason::FirstMark,
        })
    }
}
