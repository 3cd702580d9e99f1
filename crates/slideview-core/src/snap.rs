#![forbid(unsafe_code)]

//! Release-time snap decision.
//!
//! When the user lets go of the content pane, the panel settles to one of two
//! resting positions. The decision depends on the release velocity and how far
//! the pane had been dragged.
//!
//! # Policy
//!
//! - Leftward or zero velocity: open iff the pane was dragged at least half of
//!   the rear pane's width (integer half).
//! - Rightward velocity: close.
//!
//! # Known quirk
//!
//! The rightward branch has an `Open` arm guarded by a magnitude outside
//! `[0, slide_width]`. Clamping keeps the magnitude inside that range, so a
//! rightward flick of any speed closes the panel, even from fully open. Tests
//! pin the behavior.

/// Resting position chosen at gesture release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapTarget {
    /// Rear pane fully revealed; content offset is `-slide_width`.
    Open,
    /// Content pane back at rest; offset is `0`.
    Closed,
}

impl SnapTarget {
    /// Content offset corresponding to this target.
    #[inline]
    #[must_use]
    pub fn offset(self, slide_width: i32) -> i32 {
        match self {
            Self::Open => -slide_width.max(0),
            Self::Closed => 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// The other target.
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// Decide where the panel settles after a release.
///
/// `last_offset` is the last clamped content offset of the gesture and
/// `velocity` the horizontal release velocity (px/s, positive = rightward).
#[must_use]
pub fn decide(last_offset: i32, velocity: f32, slide_width: i32) -> SnapTarget {
    let magnitude = i64::from(last_offset).abs();
    let slide_width = i64::from(slide_width);

    if velocity <= 0.0 {
        if magnitude >= slide_width / 2 && magnitude <= slide_width {
            SnapTarget::Open
        } else {
            SnapTarget::Closed
        }
    } else if magnitude >= 0 && magnitude <= slide_width {
        SnapTarget::Closed
    } else {
        // Unreachable for clamped offsets.
        SnapTarget::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_opens_without_flick() {
        assert_eq!(decide(-50, 0.0, 100), SnapTarget::Open);
        assert_eq!(decide(-49, 0.0, 100), SnapTarget::Closed);
    }

    #[test]
    fn odd_width_uses_integer_half() {
        // 101 / 2 == 50
        assert_eq!(decide(-50, 0.0, 101), SnapTarget::Open);
        assert_eq!(decide(-49, 0.0, 101), SnapTarget::Closed);
    }

    #[test]
    fn leftward_flick_still_needs_halfway() {
        assert_eq!(decide(-10, -4000.0, 100), SnapTarget::Closed);
        assert_eq!(decide(-60, -4000.0, 100), SnapTarget::Open);
    }

    #[test]
    fn rightward_flick_closes_even_when_fully_open() {
        assert_eq!(decide(-100, 5.0, 100), SnapTarget::Closed);
        assert_eq!(decide(-100, 0.001, 100), SnapTarget::Closed);
        assert_eq!(decide(0, 9000.0, 100), SnapTarget::Closed);
    }

    #[test]
    fn unclamped_offset_reaches_open_arm_of_rightward_branch() {
        // Only reachable if a caller bypasses clamping.
        assert_eq!(decide(-150, 5.0, 100), SnapTarget::Open);
    }

    #[test]
    fn zero_width_always_opens_on_zero_velocity() {
        // magnitude 0 >= 0 / 2 and 0 <= 0
        assert_eq!(decide(0, 0.0, 0), SnapTarget::Open);
        assert_eq!(decide(0, 1.0, 0), SnapTarget::Closed);
    }

    #[test]
    fn target_offsets() {
        assert_eq!(SnapTarget::Open.offset(100), -100);
        assert_eq!(SnapTarget::Closed.offset(100), 0);
        assert_eq!(SnapTarget::Open.offset(-3), 0);
        assert_eq!(SnapTarget::Open.flipped(), SnapTarget::Closed);
        assert!(SnapTarget::Open.is_open());
    }
}
