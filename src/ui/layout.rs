//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the timeline sidebar gets.
pub const SIDEBAR_MAX_WIDTH: u16 = 32;

/// Navbar on top, timeline sidebar beside the page, status bar at the bottom.
/// The skills bar overlays the last row of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub navbar_area: Rect,
    pub sidebar_area: Rect,
    pub page_area: Rect,
    pub skills_bar_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // navbar
                Constraint::Min(3),    // sidebar + page
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let sidebar_width = (area.width / 3).min(SIDEBAR_MAX_WIDTH);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)])
            .split(rows[1]);

        let page_area = columns[1];
        let skills_bar_area = Rect {
            y: page_area.bottom().saturating_sub(1),
            height: page_area.height.min(1),
            ..page_area
        };

        Self {
            navbar_area: rows[0],
            sidebar_area: columns[0],
            page_area,
            skills_bar_area,
            status_area: rows[2],
        }
    }

    /// Width the page text wraps at (one column of padding each side).
    pub fn page_text_width(&self) -> u16 {
        self.page_area.width.saturating_sub(2).max(1)
    }
}

pub fn point_in_rect(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_screen() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.navbar_area.height, 1);
        assert_eq!(layout.status_area.y, 39);
        assert_eq!(layout.sidebar_area.width, 32);
        assert_eq!(layout.page_area.x, 32);
        assert_eq!(layout.page_area.height, 38);
        assert_eq!(layout.skills_bar_area.y, 38);
        assert_eq!(layout.page_text_width(), 86);
    }

    #[test]
    fn hit_testing() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(area, 2, 3));
        assert!(point_in_rect(area, 5, 4));
        assert!(!point_in_rect(area, 6, 4));
        assert!(!point_in_rect(area, 2, 5));
    }
}
