//! Marquee theme for Cinescope
//!
//! Color palette and style helpers for the TUI: cinema red on near-black,
//! gold for ratings.

use ratatui::style::{Color, Modifier, Style};

/// Color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d0d10
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x0d, 0x10);

    /// Primary: #e50914 (marquee red)
    pub const PRIMARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Secondary: #8ab4f8 (soft blue)
    pub const SECONDARY: Color = Color::Rgb(0x8a, 0xb4, 0xf8);

    /// Accent: #ffd700 (gold star)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xd7, 0x00);

    /// Text: #f5f7fa
    pub const TEXT: Color = Color::Rgb(0xf5, 0xf7, 0xfa);

    /// Dim: #7a7a85
    pub const DIM: Color = Color::Rgb(0x7a, 0x7a, 0x85);

    pub const SUCCESS: Color = Color::Rgb(0x4c, 0xd9, 0x64);

    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);

    pub const ERROR: Color = Color::Rgb(0xff, 0x45, 0x3a);

    /// Panels and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1a, 0x1a, 0x20);

    pub const BORDER: Color = Color::Rgb(0x4a, 0x4a, 0x55);

    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default().fg(Self::SECONDARY).add_modifier(Modifier::BOLD)
    }

    /// Release year
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn genre() -> Style {
        Style::default().fg(Self::DIM).add_modifier(Modifier::ITALIC)
    }

    /// Rating color by score band
    pub fn rating(score: f32) -> Style {
        if score >= 7.5 {
            Self::success()
        } else if score >= 6.0 {
            Style::default().fg(Self::ACCENT)
        } else if score >= 4.0 {
            Self::warning()
        } else {
            Style::default().fg(Self::ERROR)
        }
    }
}
