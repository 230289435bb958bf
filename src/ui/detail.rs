//! Detail view
//!
//! Metadata, cast and reviews for one title in a scrollable panel.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::detail::DetailPhase;
use crate::models::{image_url, DetailView, ImageSize};
use crate::ui::Theme;

/// Cast entries listed before "and N more"
pub const CAST_LIMIT: usize = 10;
/// Characters of review text shown per review
pub const REVIEW_EXCERPT_CHARS: usize = 400;

pub fn render(frame: &mut Frame, area: Rect, phase: Option<&DetailPhase>, scroll: u16, image_base: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" MOVIE DETAILS ", Theme::title()));

    let body = match phase {
        Some(DetailPhase::Ready(view)) => Paragraph::new(detail_lines(view, image_base))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        Some(DetailPhase::Failed(msg)) => Paragraph::new(msg.clone())
            .style(Theme::error())
            .alignment(Alignment::Center),
        _ => Paragraph::new("⟳ Loading details...")
            .style(Theme::loading())
            .alignment(Alignment::Center),
    };

    frame.render_widget(body.block(block), area);
}

/// All lines of the detail body
pub fn detail_lines(view: &DetailView, image_base: &str) -> Vec<Line<'static>> {
    let movie = &view.movie;
    let mut lines = Vec::new();

    let mut heading = vec![Span::styled(movie.title.clone(), Theme::title())];
    if let Some(year) = movie.year() {
        heading.push(Span::styled(format!(" ({})", year), Theme::year()));
    }
    lines.push(Line::from(heading));

    if let Some(tagline) = &movie.tagline {
        lines.push(Line::from(Span::styled(tagline.clone(), Theme::dimmed())));
    }

    let release = if movie.release_date.is_empty() {
        "Release date unknown".to_string()
    } else {
        movie.release_date.clone()
    };
    let runtime = movie.runtime_label().unwrap_or_else(|| "N/A".to_string());
    lines.push(Line::from(vec![
        Span::styled(format!("{} • {}", release, runtime), Theme::dimmed()),
        Span::raw("   "),
        Span::styled(format!("★ {:.1}", movie.vote_average), Theme::rating(movie.vote_average)),
        Span::styled(format!(" ({} votes)", movie.vote_count), Theme::dimmed()),
    ]));

    if !movie.genres.is_empty() {
        lines.push(Line::from(Span::styled(movie.genres.join(" · "), Theme::genre())));
    }

    let artwork = image_url(image_base, view.hero_path(), ImageSize::Medium)
        .unwrap_or_else(|| "no artwork".to_string());
    lines.push(Line::from(Span::styled(artwork, Theme::secondary())));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(movie.overview.clone(), Theme::text())));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Cast", Theme::accent())));
    if view.cast.is_empty() {
        lines.push(Line::from(Span::styled("  No cast listed.", Theme::dimmed())));
    }
    for member in view.cast.iter().take(CAST_LIMIT) {
        let mut spans = vec![Span::styled(format!("  {}", member.name), Theme::text())];
        if !member.character.is_empty() {
            spans.push(Span::styled(format!(" as {}", member.character), Theme::dimmed()));
        }
        lines.push(Line::from(spans));
    }
    if view.cast.len() > CAST_LIMIT {
        lines.push(Line::from(Span::styled(
            format!("  and {} more", view.cast.len() - CAST_LIMIT),
            Theme::dimmed(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Reviews", Theme::accent())));
    if view.reviews.is_empty() {
        lines.push(Line::from(Span::styled("  No reviews available.", Theme::dimmed())));
    }
    for review in &view.reviews {
        let date = review.created_at.get(..10).unwrap_or(&review.created_at);
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", review.author), Theme::secondary()),
            Span::styled(format!("  {}", date), Theme::dimmed()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", excerpt(&review.content, REVIEW_EXCERPT_CHARS)),
            Theme::text(),
        )));
        lines.push(Line::from(""));
    }

    lines
}

/// First `max` characters, with an ellipsis when cut
pub fn excerpt(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
