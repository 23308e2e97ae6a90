//! The environment the scroll coordinator runs inside.
//!
//! A host owns the scrollable surface and every element on it.  The
//! coordinator only ever holds `Element` handles and asks the host to
//! measure them; it never creates or destroys what they point at.

use super::geometry::Rect;

/// How a programmatic scroll should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Scroll surface plus element geometry.
pub trait ScrollHost {
    /// Lookup handle for an element owned by the host.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Largest reachable scroll offset.
    fn max_scroll_y(&self) -> f64 {
        f64::INFINITY
    }

    /// Viewport-relative geometry of `element`, or `None` when it is no
    /// longer laid out.
    fn element_rect(&self, element: &Self::Element) -> Option<Rect>;

    /// Resolve an arbitrary page anchor by id.
    fn find_element(&self, element_id: &str) -> Option<Self::Element>;

    /// Issue a native scroll command.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}
