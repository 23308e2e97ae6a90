//! Page scroll position with exponential ease-out.
//!
//! Programmatic scrolls glide toward their target: each tick covers a fixed
//! fraction of the remaining distance until the gap drops under
//! [`SNAP_DISTANCE`] rows.  User scrolls jump straight to the new row.
//! Every tick reports whether the visible row moved and whether the motion
//! just ended, which the terminal host turns into scroll and scroll-end
//! signals.

/// Remaining distance (rows) at which the glide snaps onto its target.
pub const SNAP_DISTANCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Motion {
    #[default]
    Idle,
    Gliding,
    /// Moved in one step; the next tick reports it and ends.
    Jumped,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollTick {
    pub moved: bool,
    pub ended: bool,
}

#[derive(Debug, Clone)]
pub struct PageScroller {
    position: f64,
    target: f64,
    /// `gap *= (1 - speed)` each tick.
    speed: f64,
    motion: Motion,
}

impl PageScroller {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 1.0),
            motion: Motion::Idle,
        }
    }

    /// Visible top row.
    pub fn row(&self) -> usize {
        self.position.round().max(0.0) as usize
    }

    /// Glide toward `row`.
    pub fn animate_to(&mut self, row: f64) {
        self.target = row.max(0.0);
        if self.target != self.position {
            self.motion = Motion::Gliding;
        }
    }

    /// Move to `row` in one step.
    pub fn jump_to(&mut self, row: f64) {
        let row = row.max(0.0);
        self.target = row;
        if row != self.position {
            self.position = row;
            self.motion = Motion::Jumped;
        }
    }

    /// Keep the position and any target inside `0..=max` after a relayout.
    pub fn clamp_to(&mut self, max: f64) {
        let max = max.max(0.0);
        if self.target > max {
            self.target = max;
        }
        if self.position > max {
            self.position = max;
            if self.motion == Motion::Idle {
                self.motion = Motion::Jumped;
            }
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> ScrollTick {
        match self.motion {
            Motion::Idle => ScrollTick::default(),
            Motion::Jumped => {
                self.motion = Motion::Idle;
                ScrollTick {
                    moved: true,
                    ended: true,
                }
            }
            Motion::Gliding => {
                let before = self.row();
                self.position += (self.target - self.position) * self.speed;
                let ended = (self.target - self.position).abs() < SNAP_DISTANCE;
                if ended {
                    self.position = self.target;
                    self.motion = Motion::Idle;
                }
                ScrollTick {
                    moved: self.row() != before,
                    ended,
                }
            }
        }
    }
}

impl Default for PageScroller {
    fn default() -> Self {
        Self::new(0.35)
    }
}
