//! Experience sidebar: a vertical timeline with one entry per tracked
//! section and the animated ball marking the active one.
//!
//! Entry geometry is in sidebar content rows; the widget subtracts the
//! sidebar scroll offset when drawing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

use crate::core::page::PageSection;

use super::theme::Theme;

/// Rows per entry: title, subtitle, gap.
pub const ENTRY_ROWS: usize = 3;

pub fn entry_top(index: usize) -> f64 {
    (index * ENTRY_ROWS) as f64
}

pub fn entry_center(index: usize) -> f64 {
    entry_top(index) + (ENTRY_ROWS as f64 - 1.0) / 2.0
}

/// Area the entries are drawn in (inside the right-hand border).
pub fn content_area(area: Rect) -> Rect {
    Block::default().borders(Borders::RIGHT).inner(area)
}

/// Entry under terminal row `row`, given the sidebar scroll `offset`.
pub fn entry_at(area: Rect, offset: f64, count: usize, row: u16) -> Option<usize> {
    let content = content_area(area);
    if row < content.y || row >= content.bottom() {
        return None;
    }
    let content_row = usize::from(row - content.y) + offset.max(0.0).round() as usize;
    let index = content_row / ENTRY_ROWS;
    (index < count).then_some(index)
}

pub struct TimelineWidget<'a> {
    pub entries: &'a [&'a PageSection],
    pub active: Option<usize>,
    /// Ball position in content rows.
    pub ball: f64,
    /// Sidebar scroll offset in content rows.
    pub offset: f64,
    /// Entries hidden `(above, below)` the visible window.
    pub hidden: (usize, usize),
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let line_x = inner.x + 1;
        let text_x = inner.x + 3;
        let text_width = usize::from(inner.width - 3);
        let offset = self.offset.max(0.0).round() as usize;

        for dy in 0..inner.height {
            let y = inner.y + dy;
            buf.set_string(line_x, y, "│", Theme::timeline_line_style());

            let content_row = offset + usize::from(dy);
            let index = content_row / ENTRY_ROWS;
            let Some(entry) = self.entries.get(index) else {
                continue;
            };
            let active = self.active == Some(index);
            match content_row % ENTRY_ROWS {
                0 => {
                    buf.set_string(line_x, y, "┼", Theme::timeline_line_style());
                    buf.set_stringn(text_x, y, &entry.title, text_width, Theme::entry_style(active));
                }
                1 => {
                    if let Some(subtitle) = &entry.subtitle {
                        buf.set_stringn(text_x, y, subtitle, text_width, Theme::subtitle_style());
                    }
                }
                _ => {}
            }
        }

        let ball_row = self.ball.round() - offset as f64;
        if ball_row >= 0.0 && ball_row < f64::from(inner.height) {
            buf.set_string(line_x, inner.y + ball_row as u16, "●", Theme::ball_style());
        }

        let (above, below) = self.hidden;
        let right = inner.right().saturating_sub(4);
        if above > 0 {
            buf.set_string(right, inner.y, format!("▲{above:<2}"), Theme::hidden_count_style());
        }
        if below > 0 {
            buf.set_string(right, inner.bottom() - 1, format!("▼{below:<2}"), Theme::hidden_count_style());
        }
    }
}
