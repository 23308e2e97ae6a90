//! One-row bars: the sticky skills bar and the status line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::coordinator::ScrollSnapshot;

use super::theme::Theme;

/// Skills of the active experience entry, overlaid on the page's last row.
pub struct SkillsBar<'a> {
    pub title: &'a str,
    pub skills: &'a [String],
}

impl Widget for SkillsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.title, Theme::heading_style()),
            Span::raw("  "),
            Span::styled(self.skills.join(" · "), Theme::skills_style()),
        ]);
        Paragraph::new(line)
            .style(Theme::skills_bar_style())
            .render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub snapshot: &'a ScrollSnapshot,
    pub hint: &'a str,
    pub message: Option<&'a str>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.snapshot;
        let mode = format!(" {:<12}", snap.scroll_mode.label());
        let active = snap.active_section_id.as_deref().unwrap_or("-");
        let line = Line::from(vec![
            Span::styled(mode, Theme::mode_style(snap.is_scrolling())),
            Span::raw(format!(" {active} @ {:.0} ", snap.scroll_y)),
            Span::raw("│ "),
            Span::raw(self.message.unwrap_or(self.hint)),
        ]);
        Paragraph::new(line)
            .style(Theme::status_bar_style())
            .render(area, buf);
    }
}
