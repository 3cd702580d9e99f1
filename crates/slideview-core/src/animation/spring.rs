#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) in pixel space.
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength. Higher = faster response.
//! - **damping** (c): velocity drag. `c = 2√k` is critical damping, the
//!   fastest convergence without oscillation. [`Spring::critical`] builds one.
//! - **rest_threshold**: distance (px) below which the spring may rest.
//!
//! # Integration
//!
//! Semi-implicit Euler, subdivided into steps of at most 4ms.
//!
//! # Invariants
//!
//! 1. With `no_overshoot` enabled, `position()` never crosses `target()`; a
//!    step that would cross lands exactly on the target and rests.
//! 2. A spring at rest stays at rest until `set_target()` or `reset()`.
//! 3. At rest, `position() == target()` exactly.
//! 4. Stiffness is at least 0.1; damping is non-negative.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step.
const MAX_STEP_SECS: f64 = 0.004;

/// Distance (px) below which the spring can come to rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.5;

/// Velocity (px/s) below which the spring can come to rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 5.0;

const MIN_STIFFNESS: f64 = 0.1;

/// A damped spring driving a pixel position toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    no_overshoot: bool,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Defaults: stiffness 170, damping 26, overshoot allowed.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            no_overshoot: false,
            at_rest: initial == target,
        }
    }

    /// Critically damped spring of stiffness `k` that never crosses its target.
    #[must_use]
    pub fn critical(initial: f64, target: f64, k: f64) -> Self {
        let k = k.max(MIN_STIFFNESS);
        Self::new(initial, target)
            .with_stiffness(k)
            .with_damping(2.0 * k.sqrt())
            .with_no_overshoot(true)
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    #[must_use]
    pub fn with_no_overshoot(mut self, enabled: bool) -> Self {
        self.no_overshoot = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target, keeping position and velocity. Wakes the spring.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.at_rest = self.position == target;
        if self.at_rest {
            self.velocity = 0.0;
        }
    }

    /// Land on the target and rest.
    pub fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let before = self.position - self.target;
        let acceleration = -self.stiffness * before - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;

        if self.no_overshoot {
            let after = self.position - self.target;
            if before != 0.0 && after.signum() != before.signum() {
                self.snap_to_target();
            }
        }
    }

    /// Advance by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.at_rest {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }
        if !self.at_rest
            && (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.snap_to_target();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Fraction of the initial distance already covered, in `[0.0, 1.0]`.
    fn value(&self) -> f32 {
        let span = self.target - self.initial;
        if span == 0.0 {
            return 1.0;
        }
        (((self.position - self.initial) / span) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = self.initial == self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) -> usize {
        for frame in 0..frames {
            if spring.is_complete() {
                return frame;
            }
            spring.tick(MS_16);
        }
        frames
    }

    #[test]
    fn critical_spring_reaches_target_exactly() {
        let mut spring = Spring::critical(0.0, -100.0, 170.0);
        let frames = simulate(&mut spring, 500);
        assert!(spring.is_complete(), "not at rest after {frames} frames");
        assert_eq!(spring.position(), -100.0);
    }

    #[test]
    fn critical_spring_never_overshoots() {
        let mut spring = Spring::critical(-100.0, 0.0, 400.0);
        for _ in 0..300 {
            spring.tick(MS_16);
            assert!(spring.position() <= 0.0, "overshot to {}", spring.position());
        }
    }

    #[test]
    fn critical_spring_is_monotonic() {
        let mut spring = Spring::critical(0.0, -250.0, 170.0);
        let mut prev = spring.position();
        for _ in 0..300 {
            spring.tick(MS_16);
            assert!(spring.position() <= prev);
            prev = spring.position();
        }
    }

    #[test]
    fn underdamped_spring_can_overshoot() {
        let mut spring = Spring::new(0.0, 100.0)
            .with_stiffness(300.0)
            .with_damping(5.0);
        let mut max_pos = 0.0_f64;
        for _ in 0..120 {
            spring.tick(MS_16);
            max_pos = max_pos.max(spring.position());
        }
        assert!(max_pos > 100.0, "expected overshoot, max {max_pos}");
    }

    #[test]
    fn spring_at_target_starts_at_rest() {
        let spring = Spring::new(5.0, 5.0);
        assert!(spring.is_complete());
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn set_target_wakes_spring() {
        let mut spring = Spring::critical(0.0, 0.0, 170.0);
        assert!(spring.is_at_rest());
        spring.set_target(-40.0);
        assert!(!spring.is_at_rest());
        simulate(&mut spring, 500);
        assert_eq!(spring.position(), -40.0);
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut spring = Spring::critical(10.0, 0.0, 170.0);
        simulate(&mut spring, 5);
        spring.reset();
        assert_eq!(spring.position(), 10.0);
        assert_eq!(spring.velocity(), 0.0);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn stiffness_floor() {
        let spring = Spring::new(0.0, 1.0).with_stiffness(0.0);
        assert!(spring.stiffness >= MIN_STIFFNESS);
    }
}
