//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use ratatui::layout::Rect;
use tokio::sync::watch;

use crate::config::AppConfig;
use crate::core::coordinator::{ScrollCoordinator, ScrollMode, ScrollOutcome, ScrollSnapshot, ScrollToOptions};
use crate::core::page::{PageDocument, PageSection};
use crate::core::sidebar::{hidden_item_counts, SidebarSync};
use crate::core::timeline_ball::TimelineBall;
use crate::ui::layout::AppLayout;
use crate::ui::timeline::{self, entry_center, entry_top};

use super::viewport::TerminalHost;

/// Top-level application state.
pub struct AppState {
    pub coordinator: ScrollCoordinator<TerminalHost>,
    snapshots: watch::Receiver<ScrollSnapshot>,
    /// Last snapshot received from the coordinator; what gets drawn.
    pub snapshot: ScrollSnapshot,
    pub ball: TimelineBall,
    pub sidebar: SidebarSync,
    pub config: AppConfig,
    /// Ids of the timeline entries, in page order.
    pub tracked: Vec<String>,
    pub terminal_area: Rect,
    pub should_quit: bool,
    /// Shown in the status bar instead of the key hint.
    pub status_message: Option<String>,
    /// Written by scroll completion callbacks, drained each frame.
    outcome: Rc<RefCell<Option<String>>>,
}

impl AppState {
    pub fn new(doc: PageDocument, config: AppConfig, terminal_area: Rect) -> Self {
        let layout = AppLayout::from_area(terminal_area);
        let host = TerminalHost::new(
            doc,
            layout.page_text_width(),
            layout.page_area.height,
            config.scroll_speed,
        );
        let tracked: Vec<String> = host.doc().tracked().map(|s| s.id.clone()).collect();

        let mut coordinator = ScrollCoordinator::new(host, config.coordinator.clone());
        for id in &tracked {
            coordinator.register_section(id.clone(), id.clone());
        }
        let snapshots = coordinator.subscribe();
        let snapshot = coordinator.snapshot();

        Self {
            coordinator,
            snapshots,
            snapshot,
            ball: TimelineBall::new(config.ball_config()),
            sidebar: SidebarSync::new(config.sidebar_target_ratio, config.sidebar_jitter),
            config,
            tracked,
            terminal_area,
            should_quit: false,
            status_message: None,
            outcome: Rc::new(RefCell::new(None)),
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    pub fn host(&self) -> &TerminalHost {
        self.coordinator.host()
    }

    /// Index of the active entry, read live from the coordinator.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.coordinator.active_section_id()?;
        self.tracked.iter().position(|id| id == active)
    }

    pub fn active_section(&self) -> Option<&PageSection> {
        let active = self.snapshot.active_section_id.as_deref()?;
        self.host().doc().section(active)
    }

    pub fn tracked_sections(&self) -> Vec<&PageSection> {
        self.host().doc().tracked().collect()
    }

    fn sidebar_height(&self) -> f64 {
        f64::from(timeline::content_area(self.layout().sidebar_area).height)
    }

    /// Timeline entries scrolled out of the sidebar `(above, below)`.
    pub fn hidden_counts(&self) -> (usize, usize) {
        let centers: Vec<f64> = (0..self.tracked.len()).map(entry_center).collect();
        let top = self.sidebar.offset();
        hidden_item_counts(
            &centers,
            top,
            top + self.sidebar_height(),
            self.config.sidebar_hidden_margin,
        )
    }

    // ── frame ───────────────────────────────────────────────────

    /// One rendered frame: feed scroller motion to the coordinator, let it
    /// recompute, pick up the published snapshot, then step the ball.
    pub fn frame(&mut self, now: Instant) {
        let tick = self.coordinator.host_mut().tick();
        if tick.moved {
            self.coordinator.on_scroll();
        }
        if tick.ended {
            self.coordinator.on_scroll_end();
        }
        self.coordinator.on_frame(now);

        if self.snapshots.has_changed().unwrap_or(false) {
            let next = self.snapshots.borrow_and_update().clone();
            let active_changed = next.active_section_id != self.snapshot.active_section_id;
            let settled = self.snapshot.scroll_mode == ScrollMode::Programmatic
                && next.scroll_mode != ScrollMode::Programmatic;
            self.snapshot = next;
            if active_changed || settled {
                self.follow_active();
            }
        }

        if let Some(message) = self.outcome.borrow_mut().take() {
            self.status_message = Some(message);
        }
        self.ball.frame(now);
    }

    /// Point the ball and the sidebar at the active entry.
    fn follow_active(&mut self) {
        let Some(index) = self.active_index() else {
            return;
        };
        self.ball.set_target(entry_top(index));
        let height = self.sidebar_height();
        // Mode is read live: the snapshot may lag a programmatic start.
        self.sidebar.sync(self.coordinator.scroll_mode(), entry_top(index), height);
    }

    // ── commands ────────────────────────────────────────────────

    /// Direct user scroll by `delta` rows.
    pub fn user_scroll(&mut self, delta: i64) {
        self.coordinator.on_user_input();
        self.coordinator.host_mut().scroll_by(delta);
        self.status_message = None;
    }

    pub fn user_scroll_to_top(&mut self) {
        self.coordinator.on_user_input();
        self.coordinator.host_mut().scroll_to_row(0);
        self.status_message = None;
    }

    pub fn user_scroll_to_bottom(&mut self) {
        self.coordinator.on_user_input();
        let host = self.coordinator.host_mut();
        let max = host.max_row();
        host.scroll_to_row(max);
        self.status_message = None;
    }

    pub fn page_rows(&self) -> i64 {
        i64::from(self.host().viewport_rows().saturating_sub(1).max(1))
    }

    fn report(&self, label: String) -> impl FnOnce(ScrollOutcome) + 'static {
        let sink = Rc::clone(&self.outcome);
        move |outcome| {
            let message = match outcome {
                ScrollOutcome::Completed => format!("at {label}"),
                other => format!("{label}: {}", format!("{other:?}").to_lowercase()),
            };
            *sink.borrow_mut() = Some(message);
        }
    }

    /// Smooth-scroll to timeline entry `index`.
    pub fn jump_to_entry(&mut self, index: usize) {
        let Some(id) = self.tracked.get(index).cloned() else {
            return;
        };
        let options = ScrollToOptions::default().on_complete(self.report(id.clone()));
        self.coordinator.scroll_to_section(&id, options);
        self.status_message = None;
    }

    /// Move `step` entries from the active one (or from the top).
    pub fn step_entry(&mut self, step: isize) {
        if self.tracked.is_empty() {
            return;
        }
        let last = self.tracked.len() - 1;
        let next = match self.active_index() {
            Some(current) => current.saturating_add_signed(step).min(last),
            None if step < 0 => last,
            None => 0,
        };
        self.jump_to_entry(next);
    }

    /// Smooth-scroll to a navbar anchor.
    pub fn navigate(&mut self, anchor: &str) {
        let options = ScrollToOptions::default().on_complete(self.report(anchor.to_string()));
        self.coordinator.scroll_to_element(anchor, options);
        self.status_message = None;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        let layout = self.layout();
        self.coordinator
            .host_mut()
            .relayout(layout.page_text_width(), layout.page_area.height);
        self.coordinator.on_resize();

        if let Some(index) = self.active_index() {
            self.ball.snap_to(entry_top(index));
            let height = self.sidebar_height();
            self.sidebar.sync(self.coordinator.scroll_mode(), entry_top(index), height);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn state() -> AppState {
        AppState::new(PageDocument::sample(), AppConfig::default(), Rect::new(0, 0, 100, 30))
    }

    fn run_frames(state: &mut AppState, t0: Instant, frames: u64) -> Instant {
        let mut now = t0;
        for _ in 0..frames {
            now += Duration::from_millis(16);
            state.frame(now);
        }
        now
    }

    #[test]
    fn first_frame_activates_first_entry() {
        let mut state = state();
        state.frame(Instant::now());
        assert_eq!(state.active_index(), Some(0));
        // First ball target is a snap.
        assert_eq!(state.ball.position(), entry_top(0));
        assert!(!state.ball.is_animating());
    }

    #[test]
    fn jump_settles_on_entry() {
        let mut state = state();
        let t0 = Instant::now();
        state.frame(t0);

        state.jump_to_entry(2);
        assert_eq!(state.coordinator.scroll_mode(), ScrollMode::Programmatic);
        assert_eq!(state.coordinator.active_section_id(), Some("experience-2"));

        run_frames(&mut state, t0, 200);
        assert_eq!(state.coordinator.scroll_mode(), ScrollMode::Idle);
        assert_eq!(state.active_index(), Some(2));
        assert_eq!(state.status_message.as_deref(), Some("at experience-2"));
        assert_eq!(state.ball.position(), entry_top(2));
    }

    #[test]
    fn user_scroll_interrupts_jump() {
        let mut state = state();
        let t0 = Instant::now();
        state.frame(t0);
        state.jump_to_entry(3);
        state.user_scroll(1);
        assert_eq!(state.coordinator.scroll_mode(), ScrollMode::User);

        run_frames(&mut state, t0, 2);
        assert_eq!(state.status_message.as_deref(), Some("experience-3: interrupted"));
    }

    #[test]
    fn navbar_jump_leaves_scroll_flags_current() {
        let mut state = state();
        let t0 = Instant::now();
        state.frame(t0);
        assert!(!state.snapshot.is_scrolled);

        state.navigate("contact");
        run_frames(&mut state, t0, 200);

        assert_eq!(state.status_message.as_deref(), Some("at contact"));
        assert_eq!(state.snapshot.scroll_mode, ScrollMode::Idle);
        assert_eq!(state.snapshot.scroll_y, state.host().row() as f64);
        assert!(state.host().row() > 0);
        assert!(state.snapshot.is_scrolled);
    }

    #[test]
    fn step_entry_walks_the_timeline() {
        let mut state = state();
        state.frame(Instant::now());
        state.step_entry(1);
        assert_eq!(state.coordinator.active_section_id(), Some("experience-1"));
        state.step_entry(-5);
        assert_eq!(state.coordinator.active_section_id(), Some("experience-0"));
    }

    #[test]
    fn resize_relayouts_and_snaps_ball() {
        let mut state = state();
        let t0 = Instant::now();
        state.frame(t0);
        state.jump_to_entry(1);
        run_frames(&mut state, t0, 200);

        state.resize(60, 20);
        assert_eq!(state.host().layout().width(), state.layout().page_text_width());
        assert!(!state.ball.is_animating());
        assert_eq!(state.ball.position(), entry_top(1));
    }
}
