//! Scrolled page content.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::core::page::{LineKind, PageLayout};

use super::theme::Theme;

pub struct PageWidget<'a> {
    pub layout: &'a PageLayout,
    /// First visible row.
    pub scroll: usize,
    pub active: Option<&'a str>,
}

impl PageWidget<'_> {
    fn line_style(kind: LineKind) -> Style {
        match kind {
            LineKind::Title => Theme::heading_style(),
            LineKind::Subtitle => Theme::subtitle_style(),
            LineKind::Body | LineKind::Blank => Theme::body_style(),
            LineKind::Skills => Theme::skills_style(),
        }
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // One column of padding on each side.
        let x = area.x.saturating_add(1);
        let width = usize::from(area.width.saturating_sub(2));
        for offset in 0..area.height {
            let Some((block, line)) = self.layout.line_at(self.scroll + usize::from(offset)) else {
                break;
            };
            // Dim experience entries the reader is not focused on.
            let style = if block.tracked && self.active.is_some_and(|id| id != block.id) {
                Theme::inactive_style()
            } else {
                Self::line_style(line.kind)
            };
            buf.set_stringn(x, area.y + offset, &line.text, width, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::PageDocument;

    fn row_text(buf: &Buffer, area: Rect, y: u16) -> String {
        (area.x..area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_from_scroll_row() {
        let doc = PageDocument::sample();
        let layout = PageLayout::new(&doc, 60);
        let second = &layout.blocks()[1];
        let area = Rect::new(0, 0, 62, 5);
        let mut buf = Buffer::empty(area);
        PageWidget {
            layout: &layout,
            scroll: second.top,
            active: None,
        }
        .render(area, &mut buf);
        assert_eq!(row_text(&buf, area, 0).trim_start(), second.lines[0].text);
    }

    #[test]
    fn inactive_entries_are_dimmed() {
        let doc = PageDocument::sample();
        let layout = PageLayout::new(&doc, 60);
        let exp1 = layout.block("experience-1").map(|b| b.top).unwrap_or(0);
        let area = Rect::new(0, 0, 62, 2);
        let mut buf = Buffer::empty(area);
        PageWidget {
            layout: &layout,
            scroll: exp1,
            active: Some("experience-0"),
        }
        .render(area, &mut buf);
        assert_eq!(buf[(1, 0)].style().fg, Theme::inactive_style().fg);
    }
}
