//! Terminal implementation of [`ScrollHost`]: the laid-out page plus the
//! row scroller that moves it.

use crate::core::geometry::Rect;
use crate::core::host::{ScrollBehavior, ScrollHost};
use crate::core::page::{PageDocument, PageLayout};
use crate::ui::smooth_scroll::{PageScroller, ScrollTick};

pub struct TerminalHost {
    doc: PageDocument,
    layout: PageLayout,
    scroller: PageScroller,
    viewport_rows: u16,
}

impl TerminalHost {
    pub fn new(doc: PageDocument, width: u16, viewport_rows: u16, scroll_speed: f64) -> Self {
        let layout = PageLayout::new(&doc, width);
        Self {
            doc,
            layout,
            scroller: PageScroller::new(scroll_speed),
            viewport_rows,
        }
    }

    pub fn doc(&self) -> &PageDocument {
        &self.doc
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    pub fn row(&self) -> usize {
        self.scroller.row()
    }

    pub fn max_row(&self) -> usize {
        self.layout.max_scroll(usize::from(self.viewport_rows))
    }

    /// Re-wrap the page for a new page area.
    pub fn relayout(&mut self, width: u16, viewport_rows: u16) {
        if width != self.layout.width() {
            self.layout = PageLayout::new(&self.doc, width);
        }
        self.viewport_rows = viewport_rows;
        self.scroller.clamp_to(self.max_row() as f64);
        tracing::debug!(width, viewport_rows, total = self.layout.total_height(), "relayout");
    }

    /// User scroll by `delta` rows, clamped to the page.
    pub fn scroll_by(&mut self, delta: i64) {
        let max = self.max_row() as i64;
        let row = (self.row() as i64 + delta).clamp(0, max);
        self.scroller.jump_to(row as f64);
    }

    pub fn scroll_to_row(&mut self, row: usize) {
        self.scroller.jump_to(row.min(self.max_row()) as f64);
    }

    /// Advance the scroller one frame.
    pub fn tick(&mut self) -> ScrollTick {
        self.scroller.tick()
    }
}

impl ScrollHost for TerminalHost {
    type Element = String;

    fn scroll_y(&self) -> f64 {
        self.scroller.row() as f64
    }

    fn viewport_height(&self) -> f64 {
        f64::from(self.viewport_rows)
    }

    fn max_scroll_y(&self) -> f64 {
        self.max_row() as f64
    }

    fn element_rect(&self, element: &String) -> Option<Rect> {
        let block = self.layout.block(element)?;
        Some(Rect::new(
            block.top as f64 - self.scroll_y(),
            block.height() as f64,
        ))
    }

    fn find_element(&self, element_id: &str) -> Option<String> {
        self.layout.find(element_id).map(|b| b.id.clone())
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let top = top.clamp(0.0, self.max_scroll_y());
        match behavior {
            ScrollBehavior::Smooth => self.scroller.animate_to(top),
            ScrollBehavior::Instant => self.scroller.jump_to(top),
        }
    }
}
