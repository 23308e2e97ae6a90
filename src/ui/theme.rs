//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── navbar ─────────────────────────────────────────────────
    pub fn navbar_style(scrolled: bool) -> Style {
        if scrolled {
            Style::default().bg(Color::Rgb(30, 30, 46)).fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn navbar_brand_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn navbar_link_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn skills_style() -> Style {
        Style::default().fg(Color::Magenta)
    }

    /// Experience entries other than the active one.
    pub fn inactive_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    // ── timeline ───────────────────────────────────────────────
    pub fn timeline_line_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn ball_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn entry_style(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn hidden_count_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn skills_bar_style() -> Style {
        Style::default().bg(Color::Rgb(40, 20, 50)).fg(Color::White)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn mode_style(programmatic: bool) -> Style {
        let fg = if programmatic { Color::Yellow } else { Color::Green };
        Style::default()
            .bg(Color::DarkGray)
            .fg(fg)
            .add_modifier(Modifier::BOLD)
    }
}
