//! Centralised scroll state: which section is active, whether the page has
//! scrolled past the navbar threshold, whether the sticky skills bar shows,
//! and who is currently driving the scroll position.
//!
//! All work is frame-driven.  Native scroll events only *schedule* a
//! recompute; the host calls [`ScrollCoordinator::on_frame`] once per
//! rendered frame and at most one recompute happens there.  Programmatic
//! scrolls are verified against the real scroll position instead of trusting
//! the host's scroll-end signal.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::watch;

use super::geometry::Rect;
use super::host::{ScrollBehavior, ScrollHost};

// ───────────────────────────────────────── defaults ──────────

pub const DEFAULT_NAVBAR_THRESHOLD: f64 = 50.0;
pub const DEFAULT_FOCUS_POINT_RATIO: f64 = 1.0 / 3.0;
pub const DEFAULT_SCROLL_OFFSET: f64 = -100.0;
pub const DEFAULT_SCROLL_END_FALLBACK: Duration = Duration::from_millis(800);
pub const DEFAULT_SETTLE_TOLERANCE: f64 = 5.0;
pub const DEFAULT_SETTLE_LIMIT: Duration = Duration::from_millis(3000);
pub const DEFAULT_SKILLS_BAR_ANCHOR: &str = "experience-0";
pub const DEFAULT_SKILLS_BAR_RATIO: f64 = 0.5;
pub const DEFAULT_VISIBILITY_MARGIN: f64 = 0.1;

// ───────────────────────────────────────── mode ──────────────

/// Who moved the page last.
///
/// `idle -> user` on the first throttled scroll frame, `user -> idle` on the
/// scroll-end signal, anything `-> programmatic` on a scroll-to, and back to
/// `idle` once the programmatic scroll settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    #[default]
    Idle,
    User,
    Programmatic,
}

impl ScrollMode {
    pub fn label(self) -> &'static str {
        match self {
            ScrollMode::Idle => "idle",
            ScrollMode::User => "user",
            ScrollMode::Programmatic => "programmatic",
        }
    }
}

impl fmt::Display for ScrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ───────────────────────────────────────── config ────────────

/// Tuning constants, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    /// Scroll offset past which the navbar switches to its scrolled style.
    pub navbar_threshold: f64,
    /// Focus line as a fraction of the viewport height, measured from the top.
    pub focus_point_ratio: f64,
    /// Added to a section's top when scrolling to it (room for the navbar).
    pub scroll_offset: f64,
    /// How long to wait for the host's scroll-end signal before verifying.
    pub scroll_end_fallback: Duration,
    /// Distance from the target that counts as "arrived".
    pub settle_tolerance: f64,
    /// Give up on a programmatic scroll that has not arrived after this long.
    pub settle_limit: Duration,
    /// Section whose center decides whether the skills bar is shown.
    pub skills_bar_anchor: String,
    /// Skills bar shows once the anchor's center is above this fraction of
    /// the viewport height.
    pub skills_bar_ratio: f64,
    /// Root margin (fraction of viewport height, top and bottom) used when
    /// deriving section visibility.
    pub visibility_margin: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: DEFAULT_NAVBAR_THRESHOLD,
            focus_point_ratio: DEFAULT_FOCUS_POINT_RATIO,
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            scroll_end_fallback: DEFAULT_SCROLL_END_FALLBACK,
            settle_tolerance: DEFAULT_SETTLE_TOLERANCE,
            settle_limit: DEFAULT_SETTLE_LIMIT,
            skills_bar_anchor: DEFAULT_SKILLS_BAR_ANCHOR.to_string(),
            skills_bar_ratio: DEFAULT_SKILLS_BAR_RATIO,
            visibility_margin: DEFAULT_VISIBILITY_MARGIN,
        }
    }
}

// ───────────────────────────────────────── sections ──────────

/// A registered region of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionInfo<E> {
    pub id: String,
    /// Host-owned element; only used to ask the host for geometry.
    pub element: E,
    pub is_visible: bool,
    /// Fraction of the section inside the (margin-shrunk) viewport, 0..=1.
    pub intersection_ratio: f64,
}

impl<E> SectionInfo<E> {
    fn new(id: String, element: E) -> Self {
        Self {
            id,
            element,
            is_visible: false,
            intersection_ratio: 0.0,
        }
    }
}

// ───────────────────────────────────────── snapshot ──────────

/// Everything consumers read, published as one value per batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub scroll_mode: ScrollMode,
    pub active_section_id: Option<String>,
    pub is_scrolled: bool,
    pub scroll_y: f64,
    pub show_skills_bar: bool,
}

impl ScrollSnapshot {
    pub fn is_active(&self, section_id: &str) -> bool {
        self.active_section_id.as_deref() == Some(section_id)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_mode == ScrollMode::Programmatic
    }
}

// ───────────────────────────────────────── scroll-to ─────────

/// How a programmatic scroll ended.  Every accepted scroll-to call receives
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The scroll position reached the target.
    Completed,
    /// A newer scroll-to replaced this one.
    Superseded,
    /// The user took over (or the mode was changed underneath the poll).
    Interrupted,
    /// The target was never reached within the settle limit.
    Abandoned,
    /// The coordinator was torn down first.
    Cancelled,
}

pub type ScrollCallback = Box<dyn FnOnce(ScrollOutcome)>;

/// Options for [`ScrollCoordinator::scroll_to_section`] and
/// [`ScrollCoordinator::scroll_to_element`].
#[derive(Default)]
pub struct ScrollToOptions {
    /// Overrides [`CoordinatorConfig::scroll_offset`].
    pub offset: Option<f64>,
    pub behavior: ScrollBehavior,
    pub on_complete: Option<ScrollCallback>,
}

impl ScrollToOptions {
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce(ScrollOutcome) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for ScrollToOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollToOptions")
            .field("offset", &self.offset)
            .field("behavior", &self.behavior)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Why a scroll target could not be resolved.  These are usage errors: the
/// public operations log them and do nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("section \"{0}\" is not registered")]
    UnknownSection(String),
    #[error("no element with id \"{0}\"")]
    ElementNotFound(String),
    #[error("\"{0}\" is not laid out")]
    Detached(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettlePhase {
    /// Waiting for the host's scroll-end signal (or the fallback timeout).
    AwaitingEnd,
    /// Checking the position once per frame.
    Polling,
}

struct PendingScroll {
    target_y: f64,
    /// Section to (re)activate on arrival; `None` for plain anchors.
    activates: Option<String>,
    phase: SettlePhase,
    /// Timestamp of the first frame after the scroll command.
    started: Option<Instant>,
    on_complete: Option<ScrollCallback>,
}

impl PendingScroll {
    fn finish(mut self, outcome: ScrollOutcome) {
        if let Some(callback) = self.on_complete.take() {
            callback(outcome);
        }
    }
}

// ───────────────────────────────────────── coordinator ───────

/// Single source of truth for page scroll state.  Create one per page and
/// hand it (or a [`watch::Receiver`] from [`subscribe`](Self::subscribe)) to
/// every consumer.
pub struct ScrollCoordinator<H: ScrollHost> {
    host: H,
    config: CoordinatorConfig,
    /// Registration order is kept so ties resolve to the earliest section.
    sections: Vec<SectionInfo<H::Element>>,
    state: ScrollSnapshot,
    state_tx: watch::Sender<ScrollSnapshot>,
    /// A native scroll event arrived since the last frame.
    scroll_frame_scheduled: bool,
    /// Registration or resize changed the layout since the last frame.
    recompute_scheduled: bool,
    /// The user scroll ended while its frame was still scheduled.
    idle_after_frame: bool,
    pending: Option<PendingScroll>,
}

impl<H: ScrollHost> ScrollCoordinator<H> {
    pub fn new(host: H, config: CoordinatorConfig) -> Self {
        let scroll_y = host.scroll_y();
        let state = ScrollSnapshot {
            scroll_y,
            is_scrolled: scroll_y > config.navbar_threshold,
            ..ScrollSnapshot::default()
        };
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            host,
            config,
            sections: Vec::new(),
            state,
            state_tx,
            scroll_frame_scheduled: false,
            // Initial measurement happens on the first frame.
            recompute_scheduled: true,
            idle_after_frame: false,
            pending: None,
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ScrollSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.state.clone()
    }

    /// Current mode, read directly rather than through a published snapshot.
    pub fn scroll_mode(&self) -> ScrollMode {
        self.state.scroll_mode
    }

    pub fn active_section_id(&self) -> Option<&str> {
        self.state.active_section_id.as_deref()
    }

    pub fn is_active(&self, section_id: &str) -> bool {
        self.state.is_active(section_id)
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling()
    }

    pub fn is_scrolled(&self) -> bool {
        self.state.is_scrolled
    }

    pub fn show_skills_bar(&self) -> bool {
        self.state.show_skills_bar
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionInfo<H::Element>> {
        self.sections.iter()
    }

    pub fn section(&self, id: &str) -> Option<&SectionInfo<H::Element>> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.section(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    // ── registration ────────────────────────────────────────────

    /// Start tracking `element` as section `id`.  Re-registering an id
    /// replaces the previous element.  The recompute is deferred to the next
    /// frame so a burst of registrations costs one measurement pass.
    pub fn register_section(&mut self, id: impl Into<String>, element: H::Element) {
        let id = id.into();
        match self.position(&id) {
            Some(idx) => {
                tracing::warn!(section = %id, "section registered twice; replacing previous element");
                self.sections[idx] = SectionInfo::new(id, element);
            }
            None => {
                tracing::debug!(section = %id, "register section");
                self.sections.push(SectionInfo::new(id, element));
            }
        }
        self.recompute_scheduled = true;
    }

    /// Stop tracking `id`.  Unknown ids are ignored.
    pub fn unregister_section(&mut self, id: &str) {
        let Some(idx) = self.position(id) else {
            return;
        };
        self.sections.remove(idx);
        tracing::debug!(section = %id, "unregister section");

        if self.state.active_section_id.as_deref() == Some(id) {
            self.state.active_section_id = None;
            self.publish();
        }
        self.recompute_scheduled = true;
    }

    /// Override the active section, e.g. straight after a click.
    pub fn set_active_section(&mut self, id: &str) {
        if !self.is_registered(id) {
            tracing::warn!(section = %id, "cannot activate unregistered section");
            return;
        }
        if self.state.active_section_id.as_deref() != Some(id) {
            self.state.active_section_id = Some(id.to_string());
            self.publish();
        }
    }

    /// Push an externally observed visibility change for a section.
    pub fn update_section_visibility(&mut self, id: &str, is_visible: bool, intersection_ratio: f64) {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            return;
        };
        section.is_visible = is_visible;
        section.intersection_ratio = if intersection_ratio.is_finite() {
            intersection_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    // ── programmatic scrolling ──────────────────────────────────

    /// Scroll to a registered section and activate it immediately.
    pub fn scroll_to_section(&mut self, section_id: &str, options: ScrollToOptions) {
        let target = match self.section_target(section_id, options.offset) {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(%err, "scroll_to_section ignored");
                return;
            }
        };
        self.begin_programmatic(
            target,
            options.behavior,
            Some(section_id.to_string()),
            options.on_complete,
        );
    }

    /// Scroll to any anchor the host knows about.  The active section is
    /// left alone.
    pub fn scroll_to_element(&mut self, element_id: &str, options: ScrollToOptions) {
        let target = match self.element_target(element_id, options.offset) {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(%err, "scroll_to_element ignored");
                return;
            }
        };
        self.begin_programmatic(target, options.behavior, None, options.on_complete);
    }

    fn section_target(&self, section_id: &str, offset: Option<f64>) -> Result<f64, ScrollError> {
        let section = self
            .section(section_id)
            .ok_or_else(|| ScrollError::UnknownSection(section_id.to_string()))?;
        let rect = self
            .host
            .element_rect(&section.element)
            .ok_or_else(|| ScrollError::Detached(section_id.to_string()))?;
        Ok(self.resolve_target(rect, offset))
    }

    fn element_target(&self, element_id: &str, offset: Option<f64>) -> Result<f64, ScrollError> {
        let element = self
            .host
            .find_element(element_id)
            .ok_or_else(|| ScrollError::ElementNotFound(element_id.to_string()))?;
        let rect = self
            .host
            .element_rect(&element)
            .ok_or_else(|| ScrollError::Detached(element_id.to_string()))?;
        Ok(self.resolve_target(rect, offset))
    }

    /// Document-space target for `rect`, rounded and clamped to the
    /// reachable range.
    fn resolve_target(&self, rect: Rect, offset: Option<f64>) -> f64 {
        let offset = offset.unwrap_or(self.config.scroll_offset);
        let raw = (rect.top + self.host.scroll_y() + offset).round();
        let max = self.host.max_scroll_y().max(0.0);
        raw.clamp(0.0, max)
    }

    fn begin_programmatic(
        &mut self,
        target_y: f64,
        behavior: ScrollBehavior,
        activates: Option<String>,
        on_complete: Option<ScrollCallback>,
    ) {
        if let Some(previous) = self.pending.take() {
            tracing::debug!(target_y = previous.target_y, "programmatic scroll superseded");
            previous.finish(ScrollOutcome::Superseded);
        }

        self.state.scroll_mode = ScrollMode::Programmatic;
        if let Some(id) = &activates {
            self.state.active_section_id = Some(id.clone());
        }
        self.scroll_frame_scheduled = false;
        self.idle_after_frame = false;
        self.publish();

        tracing::debug!(target_y, ?behavior, section = ?activates, "programmatic scroll");
        self.host.scroll_to(target_y, behavior);

        let phase = match behavior {
            ScrollBehavior::Smooth => SettlePhase::AwaitingEnd,
            // Instant jumps may never produce a scroll-end signal.
            ScrollBehavior::Instant => SettlePhase::Polling,
        };
        self.pending = Some(PendingScroll {
            target_y,
            activates,
            phase,
            started: None,
            on_complete,
        });
    }

    fn within_tolerance(&self, target_y: f64) -> bool {
        (self.host.scroll_y().round() - target_y).abs() <= self.config.settle_tolerance
    }

    fn complete_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.end_programmatic(ScrollMode::Idle, pending.activates.as_deref());
        pending.finish(ScrollOutcome::Completed);
    }

    /// Leave programmatic mode.  Scroll-derived flags are re-read in the
    /// same batch as the mode change.  `arrived` becomes active if it is
    /// still registered; otherwise the current active section is kept, or
    /// the closest one is picked when there is none.
    fn end_programmatic(&mut self, mode: ScrollMode, arrived: Option<&str>) {
        let viewport = self.host.viewport_height();
        let scroll_y = self.host.scroll_y();
        self.refresh_visibility(viewport);

        self.state.scroll_mode = mode;
        self.state.scroll_y = scroll_y;
        self.state.is_scrolled = scroll_y > self.config.navbar_threshold;
        self.state.show_skills_bar = self.skills_bar_visible(viewport);
        match arrived.filter(|id| self.is_registered(id)) {
            Some(id) => self.state.active_section_id = Some(id.to_string()),
            None if self.state.active_section_id.is_none() => {
                self.state.active_section_id = self.closest_section(viewport);
            }
            None => {}
        }
        self.scroll_frame_scheduled = false;
        self.idle_after_frame = false;
        self.publish();
    }

    fn settle_pending(&mut self, now: Instant) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let started = *pending.started.get_or_insert(now);
        let (target_y, phase) = (pending.target_y, pending.phase);

        if self.state.scroll_mode != ScrollMode::Programmatic {
            if let Some(pending) = self.pending.take() {
                pending.finish(ScrollOutcome::Interrupted);
            }
            return;
        }

        let elapsed = now.saturating_duration_since(started);
        match phase {
            SettlePhase::AwaitingEnd => {
                if elapsed < self.config.scroll_end_fallback {
                    return;
                }
                tracing::debug!("no scroll-end signal; verifying position");
                if self.within_tolerance(target_y) {
                    self.complete_pending();
                } else if let Some(pending) = self.pending.as_mut() {
                    pending.phase = SettlePhase::Polling;
                }
            }
            SettlePhase::Polling => {
                if self.within_tolerance(target_y) {
                    self.complete_pending();
                } else if elapsed >= self.config.settle_limit {
                    tracing::warn!(
                        target_y,
                        scroll_y = self.host.scroll_y(),
                        "programmatic scroll never reached its target; giving up"
                    );
                    if let Some(pending) = self.pending.take() {
                        self.end_programmatic(ScrollMode::Idle, None);
                        pending.finish(ScrollOutcome::Abandoned);
                    }
                }
            }
        }
    }

    // ── inbound signals ─────────────────────────────────────────

    /// Native scroll event.  Coalesced: at most one recompute per frame.
    /// While a programmatic scroll is in flight the active section is left
    /// to it and only the scroll-derived flags follow.
    pub fn on_scroll(&mut self) {
        self.scroll_frame_scheduled = true;
    }

    /// The host believes scrolling has stopped.  Not trusted on its own for
    /// programmatic scrolls: the position is checked first.
    pub fn on_scroll_end(&mut self) {
        match self.state.scroll_mode {
            ScrollMode::Programmatic => {
                let Some(pending) = self.pending.as_ref() else {
                    return;
                };
                if pending.phase != SettlePhase::AwaitingEnd {
                    return;
                }
                if self.within_tolerance(pending.target_y) {
                    self.complete_pending();
                } else if let Some(pending) = self.pending.as_mut() {
                    tracing::debug!("scroll-end arrived early; polling");
                    pending.phase = SettlePhase::Polling;
                }
            }
            ScrollMode::User | ScrollMode::Idle if self.scroll_frame_scheduled => {
                self.idle_after_frame = true;
            }
            ScrollMode::User => {
                self.state.scroll_mode = ScrollMode::Idle;
                self.publish();
            }
            ScrollMode::Idle => {}
        }
    }

    /// A direct user gesture (wheel, key, touch).  Takes over from any
    /// programmatic scroll in flight.
    pub fn on_user_input(&mut self) {
        if self.state.scroll_mode != ScrollMode::Programmatic {
            return;
        }
        let pending = self.pending.take();
        self.end_programmatic(ScrollMode::User, None);
        if let Some(pending) = pending {
            tracing::debug!(target_y = pending.target_y, "user input interrupted programmatic scroll");
            pending.finish(ScrollOutcome::Interrupted);
        }
    }

    /// The viewport changed size; geometry is re-read on the next frame.
    pub fn on_resize(&mut self) {
        self.recompute_scheduled = true;
    }

    /// Frame callback.  Settles any programmatic scroll, then runs at most
    /// one recompute.
    pub fn on_frame(&mut self, now: Instant) {
        self.settle_pending(now);

        let programmatic = self.state.scroll_mode == ScrollMode::Programmatic;
        let scrolled = std::mem::take(&mut self.scroll_frame_scheduled);
        let batched = std::mem::take(&mut self.recompute_scheduled);
        if scrolled || batched {
            self.recompute(scrolled && !programmatic);
        }

        if std::mem::take(&mut self.idle_after_frame) && self.state.scroll_mode == ScrollMode::User {
            self.state.scroll_mode = ScrollMode::Idle;
            self.publish();
        }
    }

    // ── recompute ───────────────────────────────────────────────

    fn recompute(&mut self, from_user_scroll: bool) {
        let scroll_y = self.host.scroll_y();
        let viewport = self.host.viewport_height();
        self.refresh_visibility(viewport);

        let mut next = self.state.clone();
        next.scroll_y = scroll_y;
        next.is_scrolled = scroll_y > self.config.navbar_threshold;
        next.show_skills_bar = self.skills_bar_visible(viewport);
        // An in-flight programmatic scroll owns the active section.
        if next.scroll_mode != ScrollMode::Programmatic {
            next.active_section_id = self.closest_section(viewport);
        }
        if from_user_scroll {
            next.scroll_mode = ScrollMode::User;
        }

        tracing::trace!(
            sections = self.sections.len(),
            active = ?next.active_section_id,
            show_skills_bar = next.show_skills_bar,
            "recompute"
        );
        self.state = next;
        self.publish();
    }

    fn refresh_visibility(&mut self, viewport: f64) {
        let margin = self.config.visibility_margin;
        let host = &self.host;
        for section in &mut self.sections {
            match host.element_rect(&section.element) {
                Some(rect) => {
                    let (visible, ratio) = rect.visibility(viewport, margin);
                    section.is_visible = visible;
                    section.intersection_ratio = ratio;
                }
                None => {
                    section.is_visible = false;
                    section.intersection_ratio = 0.0;
                }
            }
        }
    }

    /// Section whose center is nearest the focus line.  Linear scan; ties go
    /// to the earliest registration.
    fn closest_section(&self, viewport: f64) -> Option<String> {
        let focus = viewport * self.config.focus_point_ratio;
        let mut closest: Option<(&str, f64)> = None;
        for section in &self.sections {
            let Some(rect) = self.host.element_rect(&section.element) else {
                continue;
            };
            let distance = (rect.center() - focus).abs();
            if !distance.is_finite() {
                continue;
            }
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((section.id.as_str(), distance));
            }
        }
        closest.map(|(id, _)| id.to_string())
    }

    fn skills_bar_visible(&self, viewport: f64) -> bool {
        self.section(&self.config.skills_bar_anchor)
            .and_then(|s| self.host.element_rect(&s.element))
            .is_some_and(|rect| rect.center() < viewport * self.config.skills_bar_ratio)
    }

    fn publish(&self) {
        let next = self.state.clone();
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl<H: ScrollHost> Drop for ScrollCoordinator<H> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.finish(ScrollOutcome::Cancelled);
        }
    }
}
