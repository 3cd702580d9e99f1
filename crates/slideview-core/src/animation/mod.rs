#![forbid(unsafe_code)]

//! Animation primitives used by the settling strategies.
//!
//! - [`Animation`]: the tick/complete/value contract.
//! - [`ease_out_quint`], the settle easing curve.
//! - [`spring::Spring`]: a damped spring integrated in pixel space.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Quintic ease-out: fast start, long gentle tail.
#[inline]
#[must_use]
pub fn ease_out_quint(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv.powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quint_endpoints() {
        assert!(ease_out_quint(0.0).abs() < 1e-6);
        assert!((ease_out_quint(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quint_is_monotonic() {
        let mut prev = 0.0f32;
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let v = ease_out_quint(t);
            assert!(v >= prev - 1e-6, "easing should be monotonic at t={t}");
            prev = v;
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(ease_out_quint(-1.0), 0.0);
        assert_eq!(ease_out_quint(2.0), 1.0);
    }
}
