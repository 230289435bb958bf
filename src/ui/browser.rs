//! Title list view
//!
//! Renders a page-accumulated list of titles with the selection kept in
//! view, plus a footer line for loading / end-of-list / error state.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::models::Title;
use crate::ui::Theme;

/// What to show under the last row
#[derive(Debug, Clone, PartialEq)]
pub enum Footer {
    None,
    Loading,
    End,
    Error(String),
}

/// Borrowed view over a title list
#[derive(Debug)]
pub struct TitleBrowser<'a> {
    pub heading: &'a str,
    pub items: &'a [Title],
    pub selected: usize,
    pub focused: bool,
    pub footer: Footer,
    /// Shown when there are no items
    pub empty_message: &'a str,
}

impl<'a> TitleBrowser<'a> {
    pub fn new(heading: &'a str, items: &'a [Title], selected: usize) -> Self {
        Self {
            heading,
            items,
            selected,
            focused: true,
            footer: Footer::None,
            empty_message: "Nothing to show",
        }
    }

    pub fn footer(mut self, footer: Footer) -> Self {
        self.footer = footer;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn block(&self, title: String) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(title, Theme::title()))
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        if self.items.is_empty() {
            let (text, style) = match &self.footer {
                Footer::Loading => ("⟳ Loading...".to_string(), Theme::loading()),
                Footer::Error(msg) => (format!("{}  (r to retry)", msg), Theme::error()),
                _ => (self.empty_message.to_string(), Theme::dimmed()),
            };
            let empty = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .block(self.block(format!(" {} ", self.heading)));
            frame.render_widget(empty, area);
            return;
        }

        // Borders plus one footer row
        let visible = area.height.saturating_sub(3) as usize;
        let offset = visible_offset(self.selected, visible);

        let mut rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, title)| ListItem::new(title_line(title, i == self.selected)))
            .collect();
        if let Some(line) = footer_line(&self.footer) {
            rows.push(ListItem::new(line));
        }

        let heading = format!(
            " {} ({}/{}) ",
            self.heading,
            (self.selected + 1).min(self.items.len()),
            self.items.len()
        );
        let list = List::new(rows).block(self.block(heading)).style(Theme::text());
        frame.render_widget(list, area);
    }
}

/// First row to draw so `selected` stays visible
pub fn visible_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

/// Format: ▸ Title (Year)  ★ 7.8
pub fn title_line(title: &Title, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let year = title.year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let artwork = if title.poster_path.is_some() { "" } else { " ▫" };

    Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(
            title.title.clone(),
            if is_selected {
                Theme::list_item_selected()
            } else {
                Theme::text()
            },
        ),
        Span::styled(year, Theme::year()),
        Span::styled(artwork, Theme::dimmed()),
        Span::raw("  "),
        Span::styled(format!("★ {:.1}", title.vote_average), Theme::rating(title.vote_average)),
    ])
}

fn footer_line(footer: &Footer) -> Option<Line<'static>> {
    match footer {
        Footer::None => None,
        Footer::Loading => Some(Line::from(Span::styled("  ⟳ loading more...", Theme::loading()))),
        Footer::End => Some(Line::from(Span::styled("  — end —", Theme::dimmed()))),
        Footer::Error(msg) => Some(Line::from(Span::styled(
            format!("  ✖ {}  (r to retry)", msg),
            Theme::error(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(name: &str, date: &str, rating: f32) -> Title {
        Title {
            id: 1,
            title: name.to_string(),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            overview: String::new(),
            release_date: date.to_string(),
            vote_average: rating,
            vote_count: 10,
            genre_ids: vec![],
        }
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_title_line_format() {
        let line = title_line(&title("Dune", "2021-09-15", 7.8), true);
        assert_eq!(text_of(&line), "▸ Dune (2021)  ★ 7.8");
    }

    #[test]
    fn test_title_line_unknown_date_and_no_artwork() {
        let mut t = title("Untitled", "", 0.0);
        t.poster_path = None;
        let line = title_line(&t, false);
        assert_eq!(text_of(&line), "  Untitled ▫  ★ 0.0");
    }

    #[test]
    fn test_visible_offset() {
        assert_eq!(visible_offset(0, 10), 0);
        assert_eq!(visible_offset(9, 10), 0);
        assert_eq!(visible_offset(10, 10), 1);
        assert_eq!(visible_offset(5, 0), 0);
    }
}
