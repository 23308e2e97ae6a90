//! Keeps the experience sidebar scrolled so the active entry sits at a fixed
//! fraction of its height, and counts the entries scrolled out of view.

use super::coordinator::ScrollMode;

pub const DEFAULT_TARGET_POSITION_RATIO: f64 = 1.0 / 3.0;
pub const DEFAULT_JITTER_THRESHOLD: f64 = 5.0;
/// Slack, in content units, before an entry counts as hidden.
pub const DEFAULT_HIDDEN_MARGIN: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarSync {
    /// Where the active entry should land, as a fraction of the sidebar height.
    pub target_position_ratio: f64,
    /// Offset changes smaller than this are ignored.
    pub jitter_threshold: f64,
    current: f64,
}

impl Default for SidebarSync {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_POSITION_RATIO, DEFAULT_JITTER_THRESHOLD)
    }
}

impl SidebarSync {
    pub fn new(target_position_ratio: f64, jitter_threshold: f64) -> Self {
        Self {
            target_position_ratio: target_position_ratio.clamp(0.0, 1.0),
            jitter_threshold: jitter_threshold.max(0.0),
            current: 0.0,
        }
    }

    /// Current sidebar scroll offset.
    pub fn offset(&self) -> f64 {
        self.current
    }

    /// New sidebar offset for an active entry at `item_top` (sidebar content
    /// coordinates), or `None` if nothing should move.
    ///
    /// `mode` must be read synchronously from the coordinator; the sidebar
    /// holds still while a programmatic scroll is in flight.
    pub fn sync(&mut self, mode: ScrollMode, item_top: f64, container_height: f64) -> Option<f64> {
        if mode == ScrollMode::Programmatic || !item_top.is_finite() || !container_height.is_finite() {
            return None;
        }
        let target = (item_top - container_height * self.target_position_ratio).max(0.0);
        if (target - self.current).abs() < self.jitter_threshold {
            return None;
        }
        self.current = target;
        Some(target)
    }
}

/// Entries whose center lies above `view_top - margin` or below
/// `view_bottom + margin`.  Returns `(above, below)`.
pub fn hidden_item_counts(centers: &[f64], view_top: f64, view_bottom: f64, margin: f64) -> (usize, usize) {
    centers.iter().fold((0, 0), |(above, below), &center| {
        if center < view_top - margin {
            (above + 1, below)
        } else if center > view_bottom + margin {
            (above, below + 1)
        } else {
            (above, below)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_active_item_at_a_third() {
        let mut sync = SidebarSync::default();
        assert_eq!(sync.sync(ScrollMode::Idle, 400.0, 300.0), Some(300.0));
        assert_eq!(sync.offset(), 300.0);
    }

    #[test]
    fn never_scrolls_above_top() {
        let mut sync = SidebarSync::default();
        assert_eq!(sync.sync(ScrollMode::Idle, 220.0, 300.0), Some(120.0));
        assert_eq!(sync.sync(ScrollMode::User, 20.0, 300.0), Some(0.0));
    }

    #[test]
    fn small_changes_are_ignored() {
        let mut sync = SidebarSync::default();
        assert_eq!(sync.sync(ScrollMode::Idle, 400.0, 300.0), Some(300.0));
        assert_eq!(sync.sync(ScrollMode::User, 403.0, 300.0), None);
        assert_eq!(sync.offset(), 300.0);
    }

    #[test]
    fn holds_still_while_programmatic() {
        let mut sync = SidebarSync::default();
        assert_eq!(sync.sync(ScrollMode::Programmatic, 900.0, 300.0), None);
        assert_eq!(sync.sync(ScrollMode::Idle, 900.0, 300.0), Some(800.0));
    }

    #[test]
    fn counts_hidden_items_with_margin() {
        let centers = [10.0, 90.0, 150.0, 300.0, 390.0, 460.0];
        // Window 100..400, margin 40 → visible band 60..440.
        assert_eq!(hidden_item_counts(&centers, 100.0, 400.0, 40.0), (1, 1));
        assert_eq!(hidden_item_counts(&[], 0.0, 10.0, 0.0), (0, 0));
    }
}
