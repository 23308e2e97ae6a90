//! Position animator for the timeline indicator ball.
//!
//! The ball chases a retargetable goal with either frame-rate-independent
//! exponential smoothing or a spring-damper.  There is no duration: the loop
//! runs until the ball is close to the target *and* nearly still, then snaps
//! exactly onto it and stops until the target moves again.

use std::time::Instant;

/// Largest integration step, in seconds.  Long pauses (a suspended terminal,
/// a debugger stop) would otherwise make the spring explode.
pub const MAX_STEP: f64 = 0.1;
/// Longest single spring integration step.  Clamped frames are split into
/// substeps of at most this length so the stiff default spring stays stable.
pub const SPRING_SUBSTEP: f64 = 1.0 / 60.0;
/// Step used for the first frame of a run, when there is no previous
/// timestamp to diff against.
pub const FIRST_STEP: f64 = 1.0 / 60.0;

pub const DEFAULT_SMOOTH_FACTOR: f64 = 0.12;
pub const DEFAULT_STIFFNESS: f64 = 180.0;
pub const DEFAULT_DAMPING: f64 = 20.0;
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_REST_DISTANCE: f64 = 0.5;

/// How the ball moves toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolation {
    /// `position += (target - position) * adjusted`, with the factor scaled
    /// for elapsed time so 30 fps and 144 fps look the same.
    Lerp { smooth_factor: f64 },
    /// `a = -k (x - target) - c v`, semi-implicit Euler.
    Spring { stiffness: f64, damping: f64 },
}

impl Interpolation {
    pub fn lerp() -> Self {
        Interpolation::Lerp {
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
        }
    }

    pub fn spring() -> Self {
        Interpolation::Spring {
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::lerp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallConfig {
    pub interpolation: Interpolation,
    /// Speed (units/s) below which the ball may come to rest.
    pub velocity_threshold: f64,
    /// Distance below which the ball may come to rest.
    pub rest_distance: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            rest_distance: DEFAULT_REST_DISTANCE,
        }
    }
}

impl BallConfig {
    pub fn spring() -> Self {
        Self {
            interpolation: Interpolation::spring(),
            ..Self::default()
        }
    }

    /// Clamp every field into its usable range.
    fn sanitized(mut self) -> Self {
        self.interpolation = match self.interpolation {
            Interpolation::Lerp { smooth_factor } => Interpolation::Lerp {
                smooth_factor: if smooth_factor.is_finite() {
                    smooth_factor.clamp(1e-3, 1.0)
                } else {
                    DEFAULT_SMOOTH_FACTOR
                },
            },
            Interpolation::Spring { stiffness, damping } => Interpolation::Spring {
                stiffness: finite_or(stiffness, DEFAULT_STIFFNESS).max(0.0),
                damping: finite_or(damping, DEFAULT_DAMPING).max(0.0),
            },
        };
        self.velocity_threshold = finite_or(self.velocity_threshold, DEFAULT_VELOCITY_THRESHOLD).abs();
        self.rest_distance = finite_or(self.rest_distance, DEFAULT_REST_DISTANCE).abs();
        self
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// What the renderer reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BallState {
    pub position: f64,
    pub velocity: f64,
    pub target: f64,
    pub is_animating: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineBall {
    config: BallConfig,
    position: f64,
    velocity: f64,
    target: f64,
    running: bool,
    /// Set by the first `set_target`/`snap_to`; the first target is a snap.
    placed: bool,
    last_frame: Option<Instant>,
}

impl TimelineBall {
    pub fn new(config: BallConfig) -> Self {
        Self {
            config: config.sanitized(),
            position: 0.0,
            velocity: 0.0,
            target: 0.0,
            running: false,
            placed: false,
            last_frame: None,
        }
    }

    pub fn config(&self) -> &BallConfig {
        &self.config
    }

    pub fn state(&self) -> BallState {
        BallState {
            position: self.position,
            velocity: self.velocity,
            target: self.target,
            is_animating: self.running,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.running
    }

    /// Move the goal.  The very first call places the ball without motion;
    /// later calls keep the current position and velocity and start the
    /// loop if it is stopped.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            tracing::warn!(target, "ignoring non-finite ball target");
            return;
        }
        if !self.placed {
            self.snap_to(target);
            return;
        }
        if target == self.target && !self.running {
            return;
        }
        self.target = target;
        if !self.running {
            self.running = true;
            self.last_frame = None;
        }
    }

    /// Jump to `position` and stop.
    pub fn snap_to(&mut self, position: f64) {
        if !position.is_finite() {
            tracing::warn!(position, "ignoring non-finite ball snap");
            return;
        }
        self.placed = true;
        self.position = position;
        self.velocity = 0.0;
        self.target = position;
        self.running = false;
        self.last_frame = None;
    }

    /// Advance using the frame timestamp.  Returns whether the ball is
    /// still moving afterwards.
    pub fn frame(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        let dt = match self.last_frame {
            Some(previous) => now.saturating_duration_since(previous).as_secs_f64(),
            None => FIRST_STEP,
        };
        self.last_frame = Some(now);
        self.step(dt);
        self.running
    }

    /// Advance by `dt` seconds.  Non-positive steps are skipped; long ones
    /// are clamped to [`MAX_STEP`].
    pub fn step(&mut self, dt: f64) {
        if !self.running || !(dt > 0.0) {
            return;
        }
        let dt = dt.min(MAX_STEP);

        match self.config.interpolation {
            Interpolation::Lerp { smooth_factor } => {
                let adjusted = 1.0 - (1.0 - smooth_factor).powf(dt * 60.0);
                let previous = self.position;
                self.position += (self.target - self.position) * adjusted;
                self.velocity = (self.position - previous) / dt;
            }
            Interpolation::Spring { stiffness, damping } => {
                let mut remaining = dt;
                while remaining > 0.0 {
                    let h = remaining.min(SPRING_SUBSTEP);
                    let acceleration =
                        -stiffness * (self.position - self.target) - damping * self.velocity;
                    self.velocity += acceleration * h;
                    self.position += self.velocity * h;
                    remaining -= h;
                }
            }
        }

        let distance = (self.target - self.position).abs();
        if distance < self.config.rest_distance && self.velocity.abs() < self.config.velocity_threshold {
            self.position = self.target;
            self.velocity = 0.0;
            self.running = false;
            self.last_frame = None;
        }
    }
}

impl Default for TimelineBall {
    fn default() -> Self {
        Self::new(BallConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn placed(config: BallConfig, at: f64) -> TimelineBall {
        let mut ball = TimelineBall::new(config);
        ball.set_target(at);
        ball
    }

    #[test]
    fn first_target_snaps() {
        let mut ball = TimelineBall::default();
        ball.set_target(240.0);
        let state = ball.state();
        assert_eq!(state.position, 240.0);
        assert_eq!(state.velocity, 0.0);
        assert!(!state.is_animating);

        ball.set_target(300.0);
        assert!(ball.is_animating());
        assert_eq!(ball.position(), 240.0);
    }

    #[test]
    fn lerp_approaches_monotonically_and_stops() {
        let mut ball = placed(BallConfig::default(), 0.0);
        ball.set_target(300.0);

        let mut last_distance = 300.0;
        let mut frames = 0;
        while ball.is_animating() {
            ball.step(DT);
            let distance = 300.0 - ball.position();
            assert!(distance >= 0.0, "lerp overshot");
            assert!(distance <= last_distance);
            last_distance = distance;
            frames += 1;
            assert!(frames < 200, "lerp did not converge");
        }
        assert_eq!(ball.position(), 300.0);
        assert_eq!(ball.state().velocity, 0.0);
    }

    #[test]
    fn lerp_speed_is_frame_rate_independent() {
        let mut fast = placed(BallConfig::default(), 0.0);
        let mut slow = placed(BallConfig::default(), 0.0);
        fast.set_target(100.0);
        slow.set_target(100.0);
        for _ in 0..4 {
            fast.step(1.0 / 120.0);
        }
        slow.step(1.0 / 30.0);
        assert!((fast.position() - slow.position()).abs() < 1e-9);
    }

    #[test]
    fn spring_overshoot_is_bounded_and_converges() {
        let mut ball = placed(BallConfig::spring(), 0.0);
        ball.set_target(300.0);

        let mut peak: f64 = 0.0;
        let mut frames = 0;
        while ball.is_animating() {
            ball.step(DT);
            peak = peak.max(ball.position());
            frames += 1;
            assert!(frames < 600, "spring did not converge");
        }
        // Damping ratio ~0.75 → a few percent of overshoot at most.
        assert!(peak <= 330.0, "overshoot too large: {peak}");
        assert_eq!(ball.position(), 300.0);
    }

    #[test]
    fn retarget_mid_flight_keeps_position() {
        for config in [BallConfig::default(), BallConfig::spring()] {
            let mut ball = placed(config, 0.0);
            ball.set_target(300.0);
            for _ in 0..5 {
                ball.step(DT);
            }
            let before = ball.state();
            assert!(before.position > 0.0 && before.position < 300.0);

            ball.set_target(-100.0);
            let after = ball.state();
            assert_eq!(after.position, before.position);
            assert_eq!(after.velocity, before.velocity);
            assert_eq!(after.target, -100.0);
            assert!(after.is_animating);

            while ball.is_animating() {
                ball.step(DT);
            }
            assert_eq!(ball.position(), -100.0);
        }
    }

    #[test]
    fn huge_steps_are_clamped() {
        let mut ball = placed(BallConfig::spring(), 0.0);
        ball.set_target(1000.0);
        for _ in 0..200 {
            ball.step(3600.0);
            assert!(ball.position().is_finite());
            assert!(ball.position() < 1100.0, "spring diverged");
        }
        assert!(!ball.is_animating());
        assert_eq!(ball.position(), 1000.0);
    }

    #[test]
    fn zero_and_negative_steps_do_nothing() {
        let mut ball = placed(BallConfig::default(), 0.0);
        ball.set_target(50.0);
        ball.step(0.0);
        ball.step(-1.0);
        ball.step(f64::NAN);
        assert_eq!(ball.position(), 0.0);
        assert!(ball.position().is_finite());
    }

    #[test]
    fn frame_uses_timestamps() {
        let mut ball = placed(BallConfig::default(), 0.0);
        ball.set_target(100.0);
        let t0 = Instant::now();

        assert!(ball.frame(t0));
        let after_first = ball.position();
        assert!(after_first > 0.0);

        // Same timestamp again: no time passed, no motion.
        ball.frame(t0);
        assert_eq!(ball.position(), after_first);

        ball.frame(t0 + Duration::from_millis(16));
        assert!(ball.position() > after_first);
    }

    #[test]
    fn snap_cancels_motion() {
        let mut ball = placed(BallConfig::spring(), 0.0);
        ball.set_target(500.0);
        ball.step(DT);
        ball.snap_to(42.0);
        assert_eq!(
            ball.state(),
            BallState {
                position: 42.0,
                velocity: 0.0,
                target: 42.0,
                is_animating: false,
            }
        );
    }

    #[test]
    fn same_target_at_rest_does_not_restart() {
        let mut ball = placed(BallConfig::default(), 10.0);
        ball.set_target(10.0);
        assert!(!ball.is_animating());
    }

    #[test]
    fn non_finite_targets_are_ignored() {
        let mut ball = placed(BallConfig::default(), 10.0);
        ball.set_target(f64::NAN);
        ball.set_target(f64::INFINITY);
        ball.snap_to(f64::NEG_INFINITY);
        assert_eq!(ball.state().target, 10.0);
        assert_eq!(ball.position(), 10.0);
    }

    #[test]
    fn smooth_factor_is_clamped() {
        let ball = TimelineBall::new(BallConfig {
            interpolation: Interpolation::Lerp { smooth_factor: 4.0 },
            ..BallConfig::default()
        });
        assert_eq!(ball.config().interpolation, Interpolation::Lerp { smooth_factor: 1.0 });
    }
}
