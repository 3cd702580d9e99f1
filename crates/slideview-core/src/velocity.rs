#![forbid(unsafe_code)]

//! Horizontal release velocity estimation.
//!
//! [`VelocityTracker`] keeps the pointer samples of the active drag that fall
//! inside a trailing time window and reports the average horizontal velocity
//! across that window in pixels per second.
//!
//! # Invariants
//!
//! 1. Samples are kept in timestamp order; an out-of-order sample resets the
//!    window to that single sample.
//! 2. The reported velocity is finite and within `±max_velocity`.
//! 3. Speeds below `min_velocity` report `0.0`, so release jitter is not a
//!    fling.
//! 4. Fewer than two samples, or a zero time span, report `0.0`.

use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    time: Duration,
    x: f32,
}

/// Trailing-window horizontal velocity estimator.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    window: Duration,
    min_velocity: f32,
    max_velocity: f32,
}

impl VelocityTracker {
    /// Create a tracker averaging over `window`. Speeds below
    /// `min_velocity` read as zero; speeds above `max_velocity` are clamped.
    #[must_use]
    pub fn new(window: Duration, min_velocity: f32, max_velocity: f32) -> Self {
        let max_velocity = max_velocity.abs();
        Self {
            samples: VecDeque::with_capacity(16),
            window,
            min_velocity: min_velocity.abs().min(max_velocity),
            max_velocity,
        }
    }

    /// Record a pointer position.
    pub fn add(&mut self, time: Duration, x: f32) {
        if let Some(last) = self.samples.back()
            && time < last.time
        {
            self.samples.clear();
        }
        self.samples.push_back(Sample { time, x });

        let cutoff = time.saturating_sub(self.window);
        while self.samples.len() > 2
            && let Some(front) = self.samples.front()
            && front.time < cutoff
        {
            self.samples.pop_front();
        }
    }

    /// Average velocity (px/s) across the retained window.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let span = last.time.saturating_sub(first.time).as_secs_f32();
        if span <= 0.0 {
            return 0.0;
        }
        let v = (last.x - first.x) / span;
        if !v.is_finite() || v.abs() < self.min_velocity {
            return 0.0;
        }
        v.clamp(-self.max_velocity, self.max_velocity)
    }

    /// Number of retained samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
