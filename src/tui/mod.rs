mod app;
mod ui;

use crate::nav::{Navigator, SearchBox, SearchKey};
use anyhow::Result;
use app::{App, Focus};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Instant;

/// Lines moved by one mouse wheel notch
const WHEEL_LINES: usize = 3;

pub fn run(search: SearchBox, navigator: Navigator, initial_query: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let mut app = App::new(search, navigator);
    if let Some(query) = initial_query {
        app.set_query(&query);
    }
    tracing::info!("interactive session started");

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        app.on_render_complete(Instant::now());

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                // Only handle key press events, not release or repeat
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        app.poll_scroll(Instant::now());
        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keybindings
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
            return;
        }
        (_, KeyCode::Tab) => {
            app.cycle_focus();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Search => match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Esc => {
                    if app.search.is_open() {
                        app.search_key(SearchKey::Escape);
                    } else {
                        app.focus = Focus::Page;
                    }
                }
                KeyCode::Enter => app.search_key(SearchKey::Enter),
                KeyCode::Down => app.search_key(SearchKey::Down),
                KeyCode::Up => app.search_key(SearchKey::Up),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.type_char(c),
                _ => {}
            },
            _ => {}
        },
        Focus::Page => match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.scroll_down(app.view.height / 2),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.scroll_up(app.view.height / 2),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('/') | KeyCode::Esc => app.focus_search(),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
                KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
                KeyCode::Char(c @ '1'..='9') => {
                    app.outline_jump(c as usize - '1' as usize);
                }
                _ => {}
            },
            _ => {}
        },
        Focus::Sidebar => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('/') | KeyCode::Esc => app.focus_search(),
            KeyCode::Down | KeyCode::Char('j') => app.sidebar_next(),
            KeyCode::Up | KeyCode::Char('k') => app.sidebar_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => app.sidebar_activate(),
            _ => {}
        },
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll_down(WHEEL_LINES),
        MouseEventKind::ScrollUp => app.scroll_up(WHEEL_LINES),
        _ => {}
    }
}
