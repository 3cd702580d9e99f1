#![forbid(unsafe_code)]

//! Settling strategies: move the content offset to a resting position.
//!
//! [`SettlingAnimator`] is the seam between the controller and whatever
//! interpolation drives a settle. The controller calls
//! [`start`](SettlingAnimator::start) with the current offset and a target,
//! then [`step`](SettlingAnimator::step) once per frame until it reports
//! [`SettleStep::Settled`].
//!
//! # Contract
//!
//! 1. Offsets reported by `step` move monotonically from `from` toward `to`
//!    and never pass `to`.
//! 2. `Settled(offset)` always carries `offset == to` exactly.
//! 3. A settle completes within a bounded number of steps for any positive
//!    `dt` (both strategies cap total time at `max_duration`).
//! 4. `start` while active redirects from the given `from`; the old target is
//!    forgotten.
//!
//! # Strategies
//!
//! | Strategy | Motion |
//! |----------|--------|
//! | [`EasedSettler`] | Quintic ease-out over a duration scaled by distance / drag range |
//! | [`SpringSettler`] | Critically damped spring, clamped at the target |

use std::time::Duration;

use crate::animation::{Animation, Spring, ease_out_quint};
use crate::config::SettleConfig;

/// Result of advancing a settle by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStep {
    /// Still moving; the new offset to apply.
    Moving(i32),
    /// Reached the target; the offset equals the target.
    Settled(i32),
    /// No settle in progress.
    Idle,
}

/// Interpolation strategy for settling.
pub trait SettlingAnimator {
    /// Begin (or redirect) a settle from `from` to `to`.
    ///
    /// `drag_range` is the horizontal drag budget of the content pane; a
    /// strategy may use it to scale timing.
    fn start(&mut self, from: i32, to: i32, drag_range: i32);

    /// Advance by `dt`.
    fn step(&mut self, dt: Duration) -> SettleStep;

    /// Abandon the current settle without reaching the target.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;

    /// Target of the settle in progress.
    fn target(&self) -> Option<i32>;
}

// ---------------------------------------------------------------------------
// EasedSettler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct EasedRun {
    from: i32,
    to: i32,
    elapsed: Duration,
    duration: Duration,
}

/// Fixed-duration eased settle.
///
/// Duration is `base * (1 + distance / drag_range)`, capped at `max`. A zero
/// drag range uses the base duration.
#[derive(Debug, Clone)]
pub struct EasedSettler {
    base: Duration,
    max: Duration,
    run: Option<EasedRun>,
}

impl EasedSettler {
    #[must_use]
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            run: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &SettleConfig) -> Self {
        Self::new(config.base_duration, config.max_duration)
    }

    /// Duration of a settle covering `distance` px.
    #[must_use]
    pub fn duration_for(&self, distance: i32, drag_range: i32) -> Duration {
        if distance == 0 {
            return Duration::ZERO;
        }
        if drag_range <= 0 {
            return self.base.min(self.max);
        }
        let range = u128::from(drag_range.unsigned_abs());
        let distance = u128::from(distance.unsigned_abs());
        let nanos = self.base.as_nanos() * (range + distance) / range;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)).min(self.max)
    }
}

impl Default for EasedSettler {
    fn default() -> Self {
        Self::from_config(&SettleConfig::default())
    }
}

impl SettlingAnimator for EasedSettler {
    fn start(&mut self, from: i32, to: i32, drag_range: i32) {
        let duration = self.duration_for(to - from, drag_range);
        tracing::trace!(from, to, duration_ms = duration.as_millis() as u64, "eased settle start");
        self.run = Some(EasedRun {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        });
    }

    fn step(&mut self, dt: Duration) -> SettleStep {
        let Some(run) = self.run.as_mut() else {
            return SettleStep::Idle;
        };
        run.elapsed = run.elapsed.saturating_add(dt);
        if run.elapsed >= run.duration {
            let to = run.to;
            self.run = None;
            return SettleStep::Settled(to);
        }

        let t = run.elapsed.as_secs_f32() / run.duration.as_secs_f32();
        let progress = f64::from(ease_out_quint(t));
        let span = f64::from(run.to) - f64::from(run.from);
        let offset = (f64::from(run.from) + span * progress).round() as i32;
        SettleStep::Moving(between(offset, run.from, run.to))
    }

    fn cancel(&mut self) {
        self.run = None;
    }

    fn is_active(&self) -> bool {
        self.run.is_some()
    }

    fn target(&self) -> Option<i32> {
        self.run.map(|run| run.to)
    }
}

// ---------------------------------------------------------------------------
// SpringSettler
// ---------------------------------------------------------------------------

/// Critically damped spring settle.
#[derive(Debug, Clone)]
pub struct SpringSettler {
    stiffness: f64,
    rest_threshold: f64,
    max: Duration,
    spring: Option<(Spring, i32)>,
    elapsed: Duration,
}

impl SpringSettler {
    #[must_use]
    pub fn new(stiffness: f64, rest_threshold: f64, max: Duration) -> Self {
        Self {
            stiffness,
            rest_threshold,
            max,
            spring: None,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(config: &SettleConfig) -> Self {
        Self::new(config.spring_stiffness, config.rest_threshold, config.max_duration)
    }
}

impl Default for SpringSettler {
    fn default() -> Self {
        Self::from_config(&SettleConfig::default())
    }
}

impl SettlingAnimator for SpringSettler {
    fn start(&mut self, from: i32, to: i32, _drag_range: i32) {
        let spring = Spring::critical(f64::from(from), f64::from(to), self.stiffness)
            .with_rest_threshold(self.rest_threshold);
        tracing::trace!(from, to, stiffness = self.stiffness, "spring settle start");
        self.spring = Some((spring, from));
        self.elapsed = Duration::ZERO;
    }

    fn step(&mut self, dt: Duration) -> SettleStep {
        let Some((spring, from)) = self.spring.as_mut() else {
            return SettleStep::Idle;
        };
        let from = *from;
        self.elapsed = self.elapsed.saturating_add(dt);
        spring.tick(dt);
        if self.elapsed >= self.max {
            spring.snap_to_target();
        }

        let to = spring.target() as i32;
        if spring.is_complete() {
            self.spring = None;
            return SettleStep::Settled(to);
        }
        let offset = spring.position().round() as i32;
        SettleStep::Moving(between(offset, from, to))
    }

    fn cancel(&mut self) {
        self.spring = None;
    }

    fn is_active(&self) -> bool {
        self.spring.is_some()
    }

    fn target(&self) -> Option<i32> {
        self.spring.as_ref().map(|(spring, _)| spring.target() as i32)
    }
}

/// Keep `value` on the segment between `a` and `b`.
fn between(value: i32, a: i32, b: i32) -> i32 {
    value.clamp(a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn drive<A: SettlingAnimator>(animator: &mut A, max_steps: usize) -> (Vec<i32>, Option<i32>) {
        let mut seen = Vec::new();
        for _ in 0..max_steps {
            match animator.step(MS_16) {
                SettleStep::Moving(offset) => seen.push(offset),
                SettleStep::Settled(offset) => return (seen, Some(offset)),
                SettleStep::Idle => return (seen, None),
            }
        }
        (seen, None)
    }

    #[test]
    fn eased_duration_scales_with_distance() {
        let settler = EasedSettler::default();
        assert_eq!(settler.duration_for(0, 300), Duration::ZERO);
        assert_eq!(settler.duration_for(-150, 300), Duration::from_millis(384));
        // 256 * (1 + 300/300) = 512
        assert_eq!(settler.duration_for(300, 300), Duration::from_millis(512));
        // capped
        assert_eq!(settler.duration_for(900, 300), Duration::from_millis(600));
        // no range: base duration
        assert_eq!(settler.duration_for(50, 0), Duration::from_millis(256));
    }

    #[test]
    fn eased_settle_is_monotonic_and_exact() {
        let mut settler = EasedSettler::default();
        settler.start(-60, -100, 300);
        assert_eq!(settler.target(), Some(-100));
        let (seen, settled) = drive(&mut settler, 100);
        assert_eq!(settled, Some(-100));
        let mut prev = -60;
        for offset in seen {
            assert!(offset <= prev && offset >= -100, "offset {offset} after {prev}");
            prev = offset;
        }
        assert!(!settler.is_active());
        assert_eq!(settler.step(MS_16), SettleStep::Idle);
    }

    #[test]
    fn eased_zero_distance_settles_on_first_step() {
        let mut settler = EasedSettler::default();
        settler.start(0, 0, 300);
        assert_eq!(settler.step(MS_16), SettleStep::Settled(0));
    }

    #[test]
    fn eased_settle_bounded_by_max_duration() {
        let mut settler = EasedSettler::default();
        settler.start(0, -10_000, 1);
        let (seen, settled) = drive(&mut settler, 100);
        assert_eq!(settled, Some(-10_000));
        // 600ms / 16ms
        assert!(seen.len() <= 38, "took {} steps", seen.len());
    }

    #[test]
    fn eased_redirect_forgets_old_target() {
        let mut settler = EasedSettler::default();
        settler.start(0, -100, 300);
        let SettleStep::Moving(mid) = settler.step(MS_16) else {
            panic!("expected movement");
        };
        settler.start(mid, 0, 300);
        let (_, settled) = drive(&mut settler, 100);
        assert_eq!(settled, Some(0));
    }

    #[test]
    fn cancel_stops_settle() {
        let mut settler = EasedSettler::default();
        settler.start(0, -100, 300);
        settler.cancel();
        assert!(!settler.is_active());
        assert_eq!(settler.target(), None);
        assert_eq!(settler.step(MS_16), SettleStep::Idle);
    }

    #[test]
    fn spring_settle_is_monotonic_and_exact() {
        let mut settler = SpringSettler::default();
        settler.start(-30, 0, 300);
        let (seen, settled) = drive(&mut settler, 200);
        assert_eq!(settled, Some(0));
        let mut prev = -30;
        for offset in seen {
            assert!(offset >= prev && offset <= 0, "offset {offset} after {prev}");
            prev = offset;
        }
    }

    #[test]
    fn spring_settle_capped_by_max_duration() {
        let mut settler = SpringSettler::new(0.5, 0.5, Duration::from_millis(100));
        settler.start(0, -500, 300);
        let (seen, settled) = drive(&mut settler, 100);
        assert_eq!(settled, Some(-500));
        assert!(seen.len() <= 7, "took {} steps", seen.len());
    }

    #[test]
    fn spring_zero_distance_settles_immediately() {
        let mut settler = SpringSettler::default();
        settler.start(-100, -100, 300);
        assert_eq!(settler.step(MS_16), SettleStep::Settled(-100));
    }
}
