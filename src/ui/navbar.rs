//! Top navigation bar.  Links scroll to page anchors; the bar restyles once
//! the page has scrolled past the navbar threshold.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::Theme;

/// `(label, anchor id)` in display order.
pub const LINKS: &[(&str, &str)] = &[
    ("Profile", "profile"),
    ("Experience", "experience"),
    ("Skills", "skills"),
    ("Awards", "awards"),
    ("Contact", "contact"),
];

const BRAND: &str = " folio ";
const GAP: u16 = 2;

/// Column span `[start, end)` of every link, relative to the bar's left edge.
fn link_spans() -> impl Iterator<Item = (u16, u16, &'static str)> {
    let mut x = BRAND.chars().count() as u16 + GAP;
    LINKS.iter().map(move |&(label, anchor)| {
        let start = x;
        let end = start + label.chars().count() as u16;
        x = end + GAP;
        (start, end, anchor)
    })
}

/// Anchor of the link under `column`, if any.
pub fn link_at(area: Rect, column: u16) -> Option<&'static str> {
    let rel = column.checked_sub(area.x)?;
    link_spans()
        .find(|&(start, end, _)| rel >= start && rel < end)
        .map(|(_, _, anchor)| anchor)
}

pub struct Navbar<'a> {
    pub scrolled: bool,
    /// Anchor of the link whose part of the page sits under the focus line.
    /// Not tied to the active timeline entry, which only covers experience.
    pub current: Option<&'a str>,
}

impl Widget for Navbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(BRAND, Theme::navbar_brand_style())];
        for &(label, anchor) in LINKS {
            spans.push(Span::raw(" ".repeat(usize::from(GAP))));
            spans.push(Span::styled(label, Theme::navbar_link_style(self.current == Some(anchor))));
        }
        Paragraph::new(Line::from(spans))
            .style(Theme::navbar_style(self.scrolled))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_map_to_links() {
        let area = Rect::new(0, 0, 80, 1);
        // " folio " is 7 wide, then a 2-column gap.
        assert_eq!(link_at(area, 9), Some("profile"));
        assert_eq!(link_at(area, 15), Some("profile"));
        assert_eq!(link_at(area, 16), None);
        assert_eq!(link_at(area, 18), Some("experience"));
        assert_eq!(link_at(area, 2), None);
    }

    #[test]
    fn renders_every_label() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        Navbar {
            scrolled: true,
            current: Some("experience"),
        }
        .render(area, &mut buf);
        let text: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        for (label, _) in LINKS {
            assert!(text.contains(label), "{label} missing from {text:?}");
        }
    }
}
