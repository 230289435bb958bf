//! Terminal UI components
//!
//! Built with ratatui. Rendering only reads [`App`] state; all mutation goes
//! through key and event handling.

pub mod browser;
pub mod detail;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::api::Catalog;
use crate::app::{App, AppState, InputMode};
use crate::feed::FeedStatus;
use browser::{Footer, TitleBrowser};

/// Main render function - dispatches to view-specific renderers
pub fn render<C: Catalog + ?Sized + 'static>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    match app.state {
        AppState::Home => render_home(frame, chunks[1], app),
        AppState::Search => render_search(frame, chunks[1], app),
        AppState::Detail => detail::render(
            frame,
            chunks[1],
            app.detail.as_ref().map(|d| d.phase()),
            app.detail_scroll,
            &app.image_base,
        ),
    }
    render_status_bar(frame, chunks[2], app);
}

fn render_header<C: Catalog + ?Sized + 'static>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("CINE", Theme::title()),
        Span::styled("SCOPE", Theme::accent()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, columns[0]);

    let editing = app.input_mode == InputMode::Editing;
    let input = &app.search_input;
    let search_text = if editing {
        let (before, after): (String, String) = {
            let before = input.value.chars().take(input.cursor).collect();
            let after = input.value.chars().skip(input.cursor).collect();
            (before, after)
        };
        format!("⌕ {}│{}", before, after)
    } else if input.value.is_empty() {
        "⌕ Press / to search...".to_string()
    } else {
        format!("⌕ {}", input.value)
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            Theme::input().fg(Theme::ACCENT)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title())),
        );
    frame.render_widget(search_box, columns[1]);
}

fn render_home<C: Catalog + ?Sized + 'static>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let feed = &app.feed;
    let footer = match feed.status() {
        FeedStatus::Loading => Footer::Loading,
        FeedStatus::Errored => Footer::Error("Failed to load movies.".to_string()),
        FeedStatus::Populated if !feed.has_more() => Footer::End,
        _ => Footer::None,
    };

    TitleBrowser::new("DISCOVER", feed.items(), app.feed_list.selected)
        .footer(footer)
        .empty_message("No movies found")
        .render(frame, area);
}

fn render_search<C: Catalog + ?Sized + 'static>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let search = &app.search;
    let footer = if search.is_loading() {
        Footer::Loading
    } else if !search.items().is_empty() && !search.has_more() {
        Footer::End
    } else {
        Footer::None
    };
    let empty = if search.query().trim().is_empty() {
        "Type at least 3 characters to search"
    } else if search.has_pending_debounce() {
        "…"
    } else {
        "No results"
    };

    TitleBrowser::new("RESULTS", search.items(), app.search_list.selected)
        .footer(footer)
        .empty_message(empty)
        .focused(app.input_mode == InputMode::Normal)
        .render(frame, area);
}

fn render_status_bar<C: Catalog + ?Sized + 'static>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let line = if let Some(error) = &app.error {
        Line::from(Span::styled(format!(" ✖ {}", error), Theme::error()))
    } else {
        let hints: &[(&str, &str)] = match (app.state, app.input_mode) {
            (_, InputMode::Editing) => &[("↵", "search"), ("esc", "done"), ("^U", "clear")],
            (AppState::Home, _) => &[("↑↓", "move"), ("↵", "details"), ("r", "refresh"), ("/", "search"), ("q", "quit")],
            (AppState::Search, _) => &[("↑↓", "move"), ("↵", "details"), ("i", "edit"), ("esc", "back"), ("q", "quit")],
            (AppState::Detail, _) => &[("↑↓", "scroll"), ("esc", "back"), ("q", "quit")],
        };
        let mut spans = Vec::new();
        for (key, desc) in hints {
            spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
            spans.push(Span::styled(format!("{} ", desc), Theme::keybind_desc()));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
