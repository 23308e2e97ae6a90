//! End-to-end behaviour of the coordinator and the ball driven together the
//! way a host drives them: scroll events, then one frame at a time.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use folio_scroll::core::coordinator::{
    CoordinatorConfig, ScrollCoordinator, ScrollMode, ScrollOutcome, ScrollSnapshot, ScrollToOptions,
};
use folio_scroll::core::geometry::Rect;
use folio_scroll::core::host::{ScrollBehavior, ScrollHost};
use folio_scroll::core::timeline_ball::{BallConfig, TimelineBall};

/// A document of absolutely positioned blocks.  Smooth scrolls travel a
/// fixed number of pixels per frame.
struct Document {
    scroll_y: f64,
    viewport: f64,
    blocks: Vec<(&'static str, f64, f64)>,
    target: Option<f64>,
    speed: f64,
}

impl Document {
    fn new(viewport: f64, blocks: &[(&'static str, f64, f64)]) -> Self {
        Self {
            scroll_y: 0.0,
            viewport,
            blocks: blocks.to_vec(),
            target: None,
            speed: 120.0,
        }
    }

    /// Advance one frame; returns `(moved, ended)`.
    fn step(&mut self) -> (bool, bool) {
        let Some(target) = self.target else {
            return (false, false);
        };
        let gap = target - self.scroll_y;
        if gap.abs() <= self.speed {
            self.scroll_y = target;
            self.target = None;
            (gap != 0.0, true)
        } else {
            self.scroll_y += self.speed * gap.signum();
            (true, false)
        }
    }
}

impl ScrollHost for Document {
    type Element = &'static str;

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn element_rect(&self, element: &&'static str) -> Option<Rect> {
        self.blocks
            .iter()
            .find(|(id, _, _)| id == element)
            .map(|&(_, top, height)| Rect::new(top - self.scroll_y, height))
    }

    fn find_element(&self, element_id: &str) -> Option<&'static str> {
        self.blocks.iter().find(|(id, _, _)| *id == element_id).map(|(id, _, _)| *id)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        match behavior {
            ScrollBehavior::Smooth => self.target = Some(top),
            ScrollBehavior::Instant => self.scroll_y = top,
        }
    }
}

struct Harness {
    coord: ScrollCoordinator<Document>,
    now: Instant,
}

impl Harness {
    fn new(doc: Document) -> Self {
        let mut coord = ScrollCoordinator::new(doc, CoordinatorConfig::default());
        let ids: Vec<&'static str> = coord.host().blocks.iter().map(|(id, _, _)| *id).collect();
        for id in ids {
            coord.register_section(id, id);
        }
        let mut harness = Self {
            coord,
            now: Instant::now(),
        };
        harness.frame();
        harness
    }

    fn frame(&mut self) {
        self.now += Duration::from_millis(16);
        let (moved, ended) = self.coord.host_mut().step();
        if moved {
            self.coord.on_scroll();
        }
        if ended {
            self.coord.on_scroll_end();
        }
        self.coord.on_frame(self.now);
    }

    /// User scroll straight to `y`, followed by the frame that handles it.
    fn user_scroll_to(&mut self, y: f64) {
        self.coord.on_user_input();
        self.coord.host_mut().scroll_y = y;
        self.coord.on_scroll();
        self.frame();
    }
}

fn two_entries() -> Document {
    Document::new(900.0, &[("experience-0", 100.0, 200.0), ("experience-1", 400.0, 200.0)])
}

#[test]
fn active_section_flips_as_centers_cross_the_focus_point() {
    let mut h = Harness::new(two_entries());

    // Focus at 300: experience-0 center (200) is 100 away, experience-1 (500) is 200.
    assert_eq!(h.coord.active_section_id(), Some("experience-0"));

    // Centers 50 and 350 around focus 300 → experience-1 is closer.
    h.user_scroll_to(150.0);
    assert_eq!(h.coord.active_section_id(), Some("experience-1"));

    // Back up: experience-0 center at 160 (140 away) vs experience-1 at 460 (160 away).
    h.user_scroll_to(40.0);
    assert_eq!(h.coord.active_section_id(), Some("experience-0"));

    // Exactly between the two centers: the first registered wins.
    h.user_scroll_to(50.0);
    assert_eq!(h.coord.active_section_id(), Some("experience-0"));
}

#[test]
fn at_most_one_section_is_active_at_every_position() {
    let blocks: Vec<(&'static str, f64, f64)> = ["a", "b", "c", "d", "e", "f"]
        .into_iter()
        .enumerate()
        .map(|(i, id)| (id, i as f64 * 350.0 + 50.0, 120.0 + i as f64 * 40.0))
        .collect();
    let mut h = Harness::new(Document::new(600.0, &blocks));

    for y in (0..2200).step_by(55) {
        h.user_scroll_to(y as f64);
        let focus = y as f64 + 200.0;
        let active = h.coord.active_section_id().map(str::to_string);
        let best = blocks
            .iter()
            .map(|&(id, top, height)| (id, (top + height / 2.0 - focus).abs()))
            .fold(None::<(&str, f64)>, |best, (id, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((id, d)),
            })
            .map(|(id, _)| id.to_string());
        assert_eq!(active, best, "scroll_y={y}");
    }
}

#[test]
fn smooth_scroll_completes_once_after_travel() {
    let mut h = Harness::new(two_entries());
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outcomes);

    h.coord.scroll_to_section(
        "experience-1",
        ScrollToOptions::default().on_complete(move |o| sink.borrow_mut().push(o)),
    );
    assert_eq!(h.coord.scroll_mode(), ScrollMode::Programmatic);

    // 300px at 120px per frame: three frames of travel.
    for _ in 0..3 {
        h.frame();
        assert_eq!(h.coord.active_section_id(), Some("experience-1"));
    }
    for _ in 0..100 {
        h.frame();
    }

    assert_eq!(*outcomes.borrow(), vec![ScrollOutcome::Completed]);
    assert_eq!(h.coord.scroll_mode(), ScrollMode::Idle);
    assert_eq!(h.coord.host().scroll_y, 300.0);
    assert_eq!(h.coord.active_section_id(), Some("experience-1"));
}

#[test]
fn ball_follows_active_section_without_resetting() {
    let mut h = Harness::new(two_entries());
    let mut ball = TimelineBall::new(BallConfig::spring());
    let mut rx = h.coord.subscribe();
    let row_of = |id: &str| if id == "experience-0" { 0.0 } else { 80.0 };

    let mut now = h.now;
    let follow = |ball: &mut TimelineBall, rx: &mut tokio::sync::watch::Receiver<ScrollSnapshot>| {
        let snap = rx.borrow_and_update().clone();
        if let Some(id) = snap.active_section_id.as_deref() {
            ball.set_target(row_of(id));
        }
    };

    follow(&mut ball, &mut rx);
    assert_eq!(ball.position(), 0.0);
    assert!(!ball.is_animating());

    h.user_scroll_to(150.0);
    follow(&mut ball, &mut rx);
    for _ in 0..6 {
        now += Duration::from_millis(16);
        ball.frame(now);
    }
    let mid_flight = ball.position();
    assert!(mid_flight > 0.0 && mid_flight < 80.0);

    // Back to the first entry mid-flight: motion continues from where it is.
    h.user_scroll_to(0.0);
    follow(&mut ball, &mut rx);
    assert_eq!(ball.position(), mid_flight);

    for _ in 0..600 {
        now += Duration::from_millis(16);
        if !ball.frame(now) {
            break;
        }
    }
    assert_eq!(ball.position(), 0.0);
    assert!(!ball.is_animating());
}

#[test]
fn registry_tracks_mounts_and_unmounts() {
    let mut h = Harness::new(two_entries());
    h.coord.unregister_section("experience-0");
    h.coord.unregister_section("experience-0");
    h.frame();
    assert_eq!(h.coord.active_section_id(), Some("experience-1"));

    h.coord.unregister_section("experience-1");
    h.frame();
    assert_eq!(h.coord.active_section_id(), None);
    assert_eq!(h.coord.sections().count(), 0);

    h.coord.register_section("experience-0", "experience-0");
    h.frame();
    assert_eq!(h.coord.active_section_id(), Some("experience-0"));
}
