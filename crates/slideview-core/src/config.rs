#![forbid(unsafe_code)]

//! Tuning values for gesture recognition and settling.

use std::time::Duration;

use crate::error::{Result, SlideError};

/// Settle animation tuning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SettleConfig {
    /// Duration of an eased settle over zero distance (default: 256ms).
    pub base_duration: Duration,
    /// Upper bound on any settle (default: 600ms).
    pub max_duration: Duration,
    /// Stiffness of the spring strategy (default: 170.0).
    pub spring_stiffness: f64,
    /// Distance in px below which the spring strategy rests (default: 0.5).
    pub rest_threshold: f64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            base_duration: Duration::from_millis(256),
            max_duration: Duration::from_millis(600),
            spring_stiffness: 170.0,
            rest_threshold: 0.5,
        }
    }
}

/// Thresholds and timings for a slide panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlideConfig {
    /// Horizontal movement (px) before a touch becomes a drag (default: 8.0).
    pub touch_slop: f32,
    /// Trailing window for release velocity (default: 100ms).
    pub velocity_window: Duration,
    /// Release speed in px/s below which a release counts as stationary
    /// (default: 50.0).
    pub min_fling_velocity: f32,
    /// Release velocity cap in px/s (default: 8000.0).
    pub max_fling_velocity: f32,
    /// Time advanced by one `tick()` (default: 16ms).
    pub frame_interval: Duration,
    pub settle: SettleConfig,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            velocity_window: Duration::from_millis(100),
            min_fling_velocity: 50.0,
            max_fling_velocity: 8_000.0,
            frame_interval: Duration::from_millis(16),
            settle: SettleConfig::default(),
        }
    }
}

impl SlideConfig {
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    #[must_use]
    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_settle(mut self, settle: SettleConfig) -> Self {
        self.settle = settle;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(SlideError::invalid(
                "touch_slop",
                format!("must be finite and non-negative, got {}", self.touch_slop),
            ));
        }
        if !self.max_fling_velocity.is_finite() || self.max_fling_velocity <= 0.0 {
            return Err(SlideError::invalid(
                "max_fling_velocity",
                format!("must be finite and positive, got {}", self.max_fling_velocity),
            ));
        }
        if !self.min_fling_velocity.is_finite()
            || self.min_fling_velocity < 0.0
            || self.min_fling_velocity > self.max_fling_velocity
        {
            return Err(SlideError::invalid(
                "min_fling_velocity",
                format!(
                    "must be finite and within [0, max_fling_velocity], got {}",
                    self.min_fling_velocity
                ),
            ));
        }
        if self.velocity_window.is_zero() {
            return Err(SlideError::invalid("velocity_window", "must be non-zero"));
        }
        if self.frame_interval.is_zero() {
            return Err(SlideError::invalid("frame_interval", "must be non-zero"));
        }
        let settle = &self.settle;
        if settle.base_duration.is_zero() {
            return Err(SlideError::invalid("settle.base_duration", "must be non-zero"));
        }
        if settle.max_duration < settle.base_duration {
            return Err(SlideError::invalid(
                "settle.max_duration",
                "must not be shorter than settle.base_duration",
            ));
        }
        if !settle.spring_stiffness.is_finite() || settle.spring_stiffness <= 0.0 {
            return Err(SlideError::invalid(
                "settle.spring_stiffness",
                format!("must be finite and positive, got {}", settle.spring_stiffness),
            ));
        }
        if !settle.rest_threshold.is_finite() || settle.rest_threshold <= 0.0 {
            return Err(SlideError::invalid(
                "settle.rest_threshold",
                format!("must be finite and positive, got {}", settle.rest_threshold),
            ));
        }
        Ok(())
    }
}
