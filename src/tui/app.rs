use crate::content::outline::{OutlineEntry, active_entry, outline, should_show};
use crate::content::site::{NavItem, Page, SIDEBAR};
use crate::content::syntax::SyntaxHighlighter;
use crate::nav::{
    DropdownState, Navigation, Navigator, ScrollReason, ScrollTarget, SearchBox, SearchKey,
};
use ahash::AHashSet;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// Event poll timeout when nothing is scheduled
const TICK: Duration = Duration::from_millis(100);

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Page,
    Sidebar,
}

/// One visible row of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Link {
        title: &'static str,
        path: &'static str,
        nested: bool,
    },
    Group {
        title: &'static str,
        expanded: bool,
    },
}

/// Layout facts from the last draw, needed to turn blocks into scroll offsets
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// First wrapped line of each block
    pub block_offsets: Vec<usize>,
    pub total_lines: usize,
    /// Visible lines in the page pane
    pub height: usize,
}

impl PageView {
    /// Block shown at the top of the pane for a given scroll offset
    pub fn top_block(&self, scroll: usize) -> usize {
        self.block_offsets
            .partition_point(|&offset| offset <= scroll)
            .saturating_sub(1)
    }

    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.height)
    }
}

/// Application state
pub struct App {
    pub search: SearchBox,
    pub navigator: Navigator,
    pub focus: Focus,
    pub page_scroll: usize,
    pub sidebar_selected: usize,
    expanded: AHashSet<&'static str>,
    pub status_message: String,
    pub view: PageView,
    /// Screen areas of the search input and dropdown, for mouse hits
    pub search_area: Rect,
    pub dropdown_area: Option<Rect>,
    /// Selection and scroll offset of the dropdown list
    pub dropdown_list: ListState,
    pub highlighter: SyntaxHighlighter,
    pub should_quit: bool,
}

impl App {
    pub fn new(search: SearchBox, navigator: Navigator) -> Self {
        let status_message = format!("{} entries indexed", search.index().len());
        Self {
            search,
            navigator,
            focus: Focus::Search,
            page_scroll: 0,
            sidebar_selected: 0,
            expanded: AHashSet::new(),
            status_message,
            view: PageView::default(),
            search_area: Rect::default(),
            dropdown_area: None,
            dropdown_list: ListState::default(),
            highlighter: SyntaxHighlighter::new(),
            should_quit: false,
        }
    }

    pub fn page(&self) -> &Page {
        self.navigator.current_page()
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline(&self.page().region)
    }

    /// Outline entries and the active one, or `None` when too short to show
    pub fn visible_outline(&self) -> Option<(Vec<OutlineEntry>, Option<usize>)> {
        let entries = self.outline();
        if !should_show(&entries) {
            return None;
        }
        let active = active_entry(&entries, self.view.top_block(self.page_scroll));
        Some((entries, active))
    }

    // Search box

    pub fn set_query(&mut self, query: &str) {
        self.search.set_query(query);
        self.update_search_status();
    }

    pub fn type_char(&mut self, c: char) {
        self.search.push_char(c);
        self.update_search_status();
    }

    pub fn backspace(&mut self) {
        self.search.pop_char();
        self.update_search_status();
    }

    pub fn delete_word(&mut self) {
        self.search.delete_word();
        self.update_search_status();
    }

    fn update_search_status(&mut self) {
        self.status_message = match self.search.state() {
            DropdownState::Closed => String::new(),
            DropdownState::OpenNoResults => "No results".to_string(),
            DropdownState::OpenWithResults if self.search.is_cached() => {
                format!("{} results (cached)", self.search.results().len())
            }
            DropdownState::OpenWithResults => {
                format!("{} results", self.search.results().len())
            }
        };
    }

    pub fn search_key(&mut self, key: SearchKey) {
        if let Some(navigation) = self.search.handle_key(key) {
            self.go(navigation);
        }
    }

    pub fn activate_result(&mut self, idx: usize) {
        if let Some(navigation) = self.search.activate(idx) {
            self.go(navigation);
        }
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.search.focus();
    }

    /// Move focus to the next pane; leaving the search box closes its list
    pub fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Search => {
                self.search.dismiss();
                self.focus = Focus::Page;
            }
            Focus::Page => self.focus = Focus::Sidebar,
            Focus::Sidebar => self.focus_search(),
        }
    }

    /// Mouse press at (`column`, `row`); anywhere outside the search input and
    /// dropdown closes the dropdown
    pub fn click(&mut self, column: u16, row: u16) {
        let pos = ratatui::layout::Position::new(column, row);

        if let Some(area) = self.dropdown_area
            && area.contains(pos)
        {
            // rows start below the top border and may be scrolled
            if row > area.y {
                let idx = self.dropdown_list.offset() + (row - area.y - 1) as usize;
                self.activate_result(idx);
            }
            return;
        }
        if self.search_area.contains(pos) {
            self.focus_search();
            return;
        }
        self.search.dismiss();
        if self.focus == Focus::Search {
            self.focus = Focus::Page;
        }
    }

    // Navigation

    pub fn go(&mut self, navigation: Navigation) {
        self.status_message = navigation.target.clone();
        self.navigator.navigate(navigation);
        self.page_scroll = 0;
        self.focus = Focus::Page;
    }

    /// Call after each completed draw
    pub fn on_render_complete(&mut self, now: Instant) {
        if let Some(target) = self.navigator.on_render_complete(now) {
            self.scroll_to(target);
        }
    }

    /// Fire a due settle-delay scroll
    pub fn poll_scroll(&mut self, now: Instant) {
        if let Some(target) = self.navigator.poll_scroll(now) {
            self.scroll_to(target);
        }
    }

    /// How long the event loop may block
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.navigator
            .time_until_scroll(now)
            .map_or(TICK, |left| left.min(TICK))
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        let Some(&line) = self.view.block_offsets.get(target.block) else {
            return;
        };
        let scroll = match target.reason {
            ScrollReason::Anchor | ScrollReason::FirstMark => {
                line.saturating_sub(self.view.height / 2)
            }
            ScrollReason::Fragment => line,
        };
        self.page_scroll = scroll.min(self.view.max_scroll());
        tracing::debug!(block = target.block, line, reason = ?target.reason, "scrolled");
    }

    // Page scrolling

    pub fn scroll_down(&mut self, lines: usize) {
        self.page_scroll = (self.page_scroll + lines).min(self.view.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.page_scroll = self.page_scroll.saturating_sub(lines);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.view.height.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.view.height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.page_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.page_scroll = self.view.max_scroll();
    }

    // Sidebar

    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for item in SIDEBAR {
            match *item {
                NavItem::Link { title, path } => rows.push(SidebarRow::Link {
                    title,
                    path,
                    nested: false,
                }),
                NavItem::Group { title, children } => {
                    let expanded = self.expanded.contains(title);
                    rows.push(SidebarRow::Group { title, expanded });
                    if expanded {
                        rows.extend(children.iter().map(|&(title, path)| SidebarRow::Link {
                            title,
                            path,
                            nested: true,
                        }));
                    }
                }
            }
        }
        rows
    }

    pub fn sidebar_next(&mut self) {
        let last = self.sidebar_rows().len().saturating_sub(1);
        self.sidebar_selected = (self.sidebar_selected + 1).min(last);
    }

    pub fn sidebar_prev(&mut self) {
        self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
    }

    /// Open the selected link or toggle the selected group
    pub fn sidebar_activate(&mut self) {
        match self.sidebar_rows().get(self.sidebar_selected).copied() {
            Some(SidebarRow::Link { path, .. }) => self.go(Navigation::to(path)),
            Some(SidebarRow::Group { title, expanded }) => {
                if expanded {
                    self.expanded.remove(title);
                } else {
                    self.expanded.insert(title);
                }
            }
            None => {}
        }
    }

    /// Jump to the `idx`-th outline entry
    pub fn outline_jump(&mut self, idx: usize) {
        let entries = self.outline();
        if let Some(entry) = entries.get(idx) {
            let target = format!("{}#{}", self.navigator.route(), entry.id);
            self.go(Navigation::to(target));
        }
    }
}
