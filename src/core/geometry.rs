//! Viewport-relative measurements.
//!
//! Hosts report element geometry the way a bounding-client-rect does: `top`
//! is measured from the top edge of the viewport, so it goes negative once
//! the element has scrolled past.

/// Vertical extent of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Vertical center, the point compared against the focus line.
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Visibility of this rect inside a viewport of `viewport_height`, after
    /// shrinking the viewport by `margin_ratio` of its height at both the top
    /// and the bottom.
    ///
    /// Returns `(is_visible, ratio)` where `ratio` is the fraction of the
    /// element's own height that falls inside the shrunk viewport.
    pub fn visibility(&self, viewport_height: f64, margin_ratio: f64) -> (bool, f64) {
        let margin = viewport_height * margin_ratio.clamp(0.0, 0.5);
        let view_top = margin;
        let view_bottom = viewport_height - margin;

        let overlap = (self.bottom().min(view_bottom) - self.top.max(view_top)).max(0.0);
        if self.height <= 0.0 {
            // Zero-height elements count as visible when their edge is inside.
            let inside = self.top >= view_top && self.top <= view_bottom;
            return (inside, if inside { 1.0 } else { 0.0 });
        }
        let ratio = (overlap / self.height).clamp(0.0, 1.0);
        (ratio > 0.0, ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_midpoint() {
        let r = Rect::new(100.0, 200.0);
        assert_eq!(r.center(), 200.0);
        assert_eq!(r.bottom(), 300.0);
    }

    #[test]
    fn negative_height_is_clamped() {
        assert_eq!(Rect::new(10.0, -5.0).height, 0.0);
    }

    #[test]
    fn visibility_respects_root_margin() {
        // Viewport 1000 with 10% margins → visible band 100..900.
        let fully = Rect::new(200.0, 100.0);
        assert_eq!(fully.visibility(1000.0, 0.1), (true, 1.0));

        let half = Rect::new(850.0, 100.0);
        let (visible, ratio) = half.visibility(1000.0, 0.1);
        assert!(visible);
        assert!((ratio - 0.5).abs() < 1e-9);

        // Inside the raw viewport but entirely within the top margin.
        let hidden = Rect::new(10.0, 50.0);
        assert_eq!(hidden.visibility(1000.0, 0.1), (false, 0.0));
    }
}
