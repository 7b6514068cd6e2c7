use crate::content::page::{BlockKind, ContentRegion, InlineStyle, LeafId};
use crate::content::syntax::{CodeStyle, SyntaxHighlighter};
use crate::nav::DropdownState;
use crate::tui::app::{App, Focus, PageView, SidebarRow};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

const SIDEBAR_WIDTH: u16 = 28;
const OUTLINE_WIDTH: u16 = 26;
const DROPDOWN_WIDTH: u16 = 64;
const TAB_WIDTH: usize = 4;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar with search input
            Constraint::Min(5),    // Sidebar / page / outline
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let outline = app.visible_outline().is_some();
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(20),
            Constraint::Length(if outline { OUTLINE_WIDTH } else { 0 }),
        ])
        .split(chunks[1]);

    draw_sidebar(f, app, main[0]);
    draw_page(f, app, main[1]);
    if outline {
        draw_outline(f, app, main[2]);
    }
    draw_status_bar(f, app, chunks[2]);

    // dropdown last so it overlays the page
    draw_navbar(f, app, chunks[0]);
}

fn focus_border(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_navbar(f: &mut Frame, app: &mut App, area: Rect) {
    let input = Paragraph::new(app.search.query())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app, Focus::Search))
                .title(" FeatherAI Docs | Search (Tab: focus, Ctrl+C: quit) "),
        );
    f.render_widget(input, area);
    app.search_area = area;

    if app.focus == Focus::Search {
        let cursor = app.search.query().chars().count() as u16;
        f.set_cursor_position((area.x + cursor + 1, area.y + 1));
    }

    app.dropdown_area = match app.search.state() {
        DropdownState::Closed => None,
        state => Some(draw_dropdown(f, app, area, state)),
    };
}

fn draw_dropdown(f: &mut Frame, app: &mut App, navbar: Rect, state: DropdownState) -> Rect {
    let screen = f.area();
    let rows = match state {
        DropdownState::OpenWithResults => app.search.results().len() as u16,
        _ => 1,
    };
    let area = Rect {
        x: navbar.x,
        y: navbar.y + navbar.height,
        width: DROPDOWN_WIDTH.min(screen.width.saturating_sub(navbar.x)),
        height: (rows + 2).min(screen.height.saturating_sub(navbar.y + navbar.height)),
    };
    f.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title(" Results ");
    if state == DropdownState::OpenNoResults {
        let text = format!("No results found for \"{}\"", app.search.query().trim());
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return area;
    }

    let items: Vec<ListItem> = app
        .search
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let style = if app.search.selected() == Some(i) {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![Span::styled(
                result.entry.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )];
            if let Some(section) = &result.entry.section {
                spans.push(Span::styled(
                    format!(" > {}", section),
                    Style::default().fg(Color::Gray),
                ));
            }
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                result.entry.category.clone(),
                Style::default().fg(Color::Blue),
            ));
            if !result.matched_keyword.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    result.matched_keyword.clone(),
                    Style::default().fg(Color::Yellow),
                ));
            }

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    // keep the selected row visible when the list is taller than the screen
    app.dropdown_list.select(app.search.selected());
    if app.search.selected().is_none() {
        *app.dropdown_list.offset_mut() = 0;
    }
    f.render_stateful_widget(List::new(items).block(block), area, &mut app.dropdown_list);
    area
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let route = app.navigator.route();
    let items: Vec<ListItem> = app
        .sidebar_rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let (text, mut style) = match row {
                SidebarRow::Link {
                    title,
                    path,
                    nested,
                } => {
                    let indent = if nested { "    " } else { "  " };
                    let style = if path == route {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    (format!("{}{}", indent, title), style)
                }
                SidebarRow::Group { title, expanded } => {
                    let arrow = if expanded { "v" } else { ">" };
                    (
                        format!("{} {}", arrow, title),
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                }
            };
            if app.focus == Focus::Sidebar && i == app.sidebar_selected {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(app, Focus::Sidebar))
            .title(" Docs "),
    );
    f.render_widget(list, area);
}

fn draw_page(f: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let (lines, block_offsets) = page_lines(&app.page().region, width, &app.highlighter);

    app.view = PageView {
        block_offsets,
        total_lines: lines.len(),
        height: area.height.saturating_sub(2) as usize,
    };
    app.page_scroll = app.page_scroll.min(app.view.max_scroll());

    let title = format!(" {} ", app.page().title);
    let page = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app, Focus::Page))
                .title(title),
        )
        .scroll((app.page_scroll as u16, 0));
    f.render_widget(page, area);
}

fn draw_outline(f: &mut Frame, app: &App, area: Rect) {
    let Some((entries, active)) = app.visible_outline() else {
        return;
    };

    let items: Vec<ListItem> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if active == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(format!("{} {}", i + 1, entry.text)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" On this page "),
    );
    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.focus {
        Focus::Search => "Up/Down: select  Enter: open  Esc: close",
        Focus::Page => "j/k: scroll  PgUp/PgDn  g/G  1-9: outline  /: search  q: quit",
        Focus::Sidebar => "j/k: move  Enter: open  q: quit",
    };
    let line = Line::from(vec![
        Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn leaf_style(style: &InlineStyle) -> Style {
    match style {
        InlineStyle::Plain => Style::default(),
        InlineStyle::Emphasis => Style::default().add_modifier(Modifier::ITALIC),
        InlineStyle::Strong => Style::default().add_modifier(Modifier::BOLD),
        InlineStyle::Link(_) => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        InlineStyle::Code => Style::default().fg(Color::Green),
    }
}

/// Convert a syntax color to a ratatui style
fn code_style(style: CodeStyle) -> Style {
    let mut ratatui_style = match style.fg {
        Some((r, g, b)) => Style::default().fg(Color::Rgb(r, g, b)),
        None => Style::default().fg(Color::Green),
    };
    if style.bold {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    ratatui_style
}

fn mark_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Lay out a region as wrapped lines. Returns the lines and the first line of
/// each block.
pub fn page_lines(
    region: &ContentRegion,
    width: usize,
    highlighter: &SyntaxHighlighter,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let width = width.max(10);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut offsets = Vec::with_capacity(region.blocks().len());

    for (b, block) in region.blocks().iter().enumerate() {
        let previous_was_item = b > 0
            && matches!(
                region.blocks()[b - 1].kind,
                BlockKind::ListItem { .. }
            );
        let is_item = matches!(block.kind, BlockKind::ListItem { .. });
        if b > 0 && !(is_item && previous_was_item) {
            lines.push(Line::default());
        }
        offsets.push(lines.len());

        match &block.kind {
            BlockKind::CodeBlock { lang } => {
                let code = expand_tabs(&block.text());
                for spans in highlighter.highlight(&code, lang.as_deref()) {
                    let mut line = vec![Span::raw("  ")];
                    line.extend(
                        spans
                            .into_iter()
                            .map(|span| Span::styled(span.text, code_style(span.style))),
                    );
                    lines.push(Line::from(line));
                }
                continue;
            }
            BlockKind::Html => {
                let style = Style::default().fg(Color::Green);
                for line in expand_tabs(&block.text()).lines() {
                    lines.push(Line::from(Span::styled(format!("  {}", line), style)));
                }
                continue;
            }
            _ => {}
        }

        let (prefix, base) = match &block.kind {
            BlockKind::Heading { level, .. } => (
                format!("{} ", "#".repeat(*level as usize)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            BlockKind::ListItem { depth } => (format!("{}* ", "  ".repeat(*depth)), Style::default()),
            BlockKind::Quote => ("| ".to_string(), Style::default().fg(Color::Gray)),
            _ => (String::new(), Style::default()),
        };

        let mut pieces = Vec::new();
        for (l, leaf) in block.leaves.iter().enumerate() {
            let style = base.patch(leaf_style(&leaf.style));
            for segment in region.segments(LeafId { block: b, leaf: l }) {
                let style = if segment.highlighted {
                    style.patch(mark_style())
                } else {
                    style
                };
                pieces.push((segment.text.to_string(), style));
            }
        }

        lines.extend(wrap_pieces(&prefix, base, pieces, width));
    }

    (lines, offsets)
}

/// Word-wrap styled pieces to `width` columns. Continuation lines are indented
/// to line up under the first.
fn wrap_pieces(
    prefix: &str,
    prefix_style: Style,
    pieces: Vec<(String, Style)>,
    width: usize,
) -> Vec<Line<'static>> {
    let indent = " ".repeat(prefix.chars().count());
    let mut lines = Vec::new();
    let mut current = vec![Span::styled(prefix.to_string(), prefix_style)];
    let mut column = prefix.chars().count();

    for (text, style) in pieces {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
                current.push(Span::raw(indent.clone()));
                column = indent.len();
            }
            for word in part.split_inclusive(' ') {
                let visible = word.trim_end().chars().count();
                if column + visible > width && column > indent.len() {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    current.push(Span::raw(indent.clone()));
                    column = indent.len();
                }
                current.push(Span::styled(word.to_string(), style));
                column += word.chars().count();
            }
        }
    }

    lines.push(Line::from(current));
    lines
}

/// Expand tabs to spaces with a tab width of 4.
fn expand_tabs(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut column = 0;

    for c in s.chars() {
        match c {
            '\t' => {
                let spaces = TAB_WIDTH - (column % TAB_WIDTH);
                result.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                result.push(c);
                column = 0;
            }
            _ => {
                result.push(c);
                column += 1;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::highlight::apply_highlights;
    use crate::content::site::Page;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx"), "    x");
        assert_eq!(expand_tabs("ab\tc"), "ab  c");
    }

    #[test]
    fn test_wrap_respects_width() {
        let pieces = vec![("one two three four".to_string(), Style::default())];
        let lines = wrap_pieces("", Style::default(), pieces, 10);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["one two ", "three four"]);
    }

    #[test]
    fn test_wrap_indents_continuation() {
        let pieces = vec![("alpha beta gamma".to_string(), Style::default())];
        let lines = wrap_pieces("* ", Style::default(), pieces, 12);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["* alpha beta ", "  gamma"]);
    }

    #[test]
    fn test_code_blocks_colored_without_marks() {
        let mut page = Page::from_markdown(
            "/t",
            "T",
            "Call crawl here.\n\n```python\nresult = crawl(\"https://example.com\")\n```\n",
        );
        apply_highlights(&mut page.region, "crawl");
        assert_eq!(page.region.marks().len(), 1);

        let (lines, offsets) = page_lines(&page.region, 80, &SyntaxHighlighter::new());
        let code = &lines[offsets[1]];
        assert_eq!(line_text(code), "  result = crawl(\"https://example.com\")");

        let colors: std::collections::HashSet<_> =
            code.spans.iter().skip(1).map(|s| s.style.fg).collect();
        assert!(colors.len() > 1);
        assert!(code.spans.iter().all(|s| s.style.bg != Some(Color::Yellow)));
    }

    #[test]
    fn test_dropdown_scrolls_to_selection() {
        use crate::content::site::Site;
        use crate::index::DocIndex;
        use crate::nav::{DEFAULT_SETTLE, Navigator, SearchBox, SearchKey};
        use crate::query::Scorer;
        use ratatui::{Terminal, backend::TestBackend};

        let search = SearchBox::new(DocIndex::builtin().unwrap(), Scorer::with_defaults());
        let mut app = App::new(search, Navigator::new(Site::builtin(), DEFAULT_SETTLE));
        app.set_query("tools");
        let last = app.search.results().len() - 1;
        for _ in 0..=last {
            app.search_key(SearchKey::Down);
        }
        assert_eq!(app.search.selected(), Some(last));

        // 3 rows of navbar leave room for 3 result rows between the borders
        let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let area = app.dropdown_area.unwrap();
        let visible = (area.height - 2) as usize;
        let offset = app.dropdown_list.offset();
        assert!(offset > 0);
        assert!((offset..offset + visible).contains(&last));
    }

    #[test]
    fn test_page_lines_offsets_and_marks() {
        let mut page = Page::from_markdown(
            "/t",
            "T",
            "# Title\n\nCrawl a website.\n\n- a\n- b\n\n```\ncode\n```\n",
        );
        apply_highlights(&mut page.region, "website");

        let (lines, offsets) = page_lines(&page.region, 80, &SyntaxHighlighter::new());
        assert_eq!(offsets, vec![0, 2, 4, 5, 7]);
        assert_eq!(line_text(&lines[0]), "# Title");
        assert_eq!(line_text(&lines[4]), "* a");
        assert_eq!(line_text(&lines[7]), "  code");

        let marked: Vec<&Span> = lines[2]
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::Yellow))
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].content.as_ref(), "website");
    }
}
