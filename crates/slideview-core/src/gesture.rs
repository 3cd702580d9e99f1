#![forbid(unsafe_code)]

//! Touch gesture tracking for the content pane.
//!
//! [`TouchGestureTracker`] turns a raw [`PointerEvent`] stream into
//! [`TrackAction`]s that the controller executes: capture the content pane,
//! drag it by a pixel delta, or release it with a velocity.
//!
//! # State Machine
//!
//! - **Untracked**: no pointer is down.
//! - **Armed**: a pointer is down but has not moved past the touch slop.
//!   Taps stay here until `Up` and pass through to the children.
//! - **Captured**: the content pane follows the pointer.
//!
//! A `Down` on the content pane while a settle is in flight captures
//! immediately, so the user can catch a moving panel.
//!
//! # Invariants
//!
//! 1. Only the pointer that went down is tracked; events from other pointer
//!    ids are ignored until the gesture ends.
//! 2. `Capture` is emitted at most once per gesture and always precedes any
//!    `Drag` or `Release`.
//! 3. `Release` is emitted only for a captured gesture. `Cancel` releases with
//!    zero velocity.
//! 4. The first drag delta after a slop capture is measured from the `Down`
//!    position, so no movement is lost to the slop.
//!
//! # Failure Modes
//!
//! - A `Move`/`Up` without a prior `Down` is ignored.
//! - Non-finite coordinates are ignored.

use crate::clamp;
use crate::config::SlideConfig;
use crate::event::{PointerEvent, PointerKind};
use crate::host::PaneRole;
use crate::snap::{self, SnapTarget};
use crate::velocity::VelocityTracker;

/// What the controller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackAction {
    /// Not ours: let the children handle it.
    Pass,
    /// Event belongs to another pointer or is malformed.
    Ignore,
    /// Take the gesture, then drag by `dx` (may be zero).
    Capture { dx: i32 },
    /// Drag the captured pane by `dx`.
    Drag { dx: i32 },
    /// The captured gesture ended.
    Release { velocity: f32 },
}

/// Panel facts needed to classify an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackContext {
    /// Current content offset.
    pub offset: i32,
    pub content_width: i32,
    /// A settle is in flight.
    pub settling: bool,
}

impl TrackContext {
    /// Whether `x` falls on the content pane's current horizontal extent.
    #[must_use]
    pub fn hits_content(&self, x: f32) -> bool {
        let left = self.offset as f32;
        let right = left + self.content_width.max(0) as f32;
        x >= left && x < right
    }
}

/// Result of applying one drag delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Clamped content offset after the move.
    pub offset: i32,
    /// Displacement actually applied (post-clamp) to both panes.
    pub applied_dx: i32,
    /// `|offset| / content_width` in `[0.0, 1.0]`.
    pub percent: f32,
}

impl MoveOutcome {
    /// Outcome describing a pane at rest at `offset`.
    #[must_use]
    pub fn at_rest(offset: i32, content_width: i32) -> Self {
        Self {
            offset,
            applied_dx: 0,
            percent: drag_percent(offset, content_width),
        }
    }
}

/// `|offset| / content_width`, clamped to `[0.0, 1.0]`; zero without width.
#[must_use]
pub fn drag_percent(offset: i32, content_width: i32) -> f32 {
    if content_width <= 0 {
        return 0.0;
    }
    (offset.unsigned_abs() as f32 / content_width as f32).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy)]
struct Pointer {
    id: u32,
    down_x: i32,
    down_y: i32,
    last_x: i32,
    on_content: bool,
    captured: bool,
}

/// Stateful tracker for single-pointer horizontal drags.
#[derive(Debug, Clone)]
pub struct TouchGestureTracker {
    touch_slop: f32,
    pointer: Option<Pointer>,
    velocity: VelocityTracker,
}

impl TouchGestureTracker {
    #[must_use]
    pub fn new(config: &SlideConfig) -> Self {
        Self {
            touch_slop: config.touch_slop.max(0.0),
            pointer: None,
            velocity: VelocityTracker::new(
                config.velocity_window,
                config.min_fling_velocity,
                config.max_fling_velocity,
            ),
        }
    }

    /// Only the content pane may be captured.
    #[inline]
    #[must_use]
    pub fn can_capture(role: PaneRole) -> bool {
        role == PaneRole::Content
    }

    /// Whether a pointer is down (armed or captured).
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    /// Id of the pointer being tracked, if any.
    #[inline]
    #[must_use]
    pub fn active_pointer(&self) -> Option<u32> {
        self.pointer.map(|p| p.id)
    }

    /// Whether the current gesture owns the content pane.
    #[inline]
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.pointer.is_some_and(|p| p.captured)
    }

    /// Forget the current gesture without emitting anything.
    pub fn reset(&mut self) {
        self.pointer = None;
        self.velocity.clear();
    }

    /// Classify `event` and update tracking state.
    pub fn track(&mut self, event: &PointerEvent, ctx: TrackContext) -> TrackAction {
        if !event.x.is_finite() || !event.y.is_finite() {
            tracing::trace!(?event, "non-finite pointer coordinates ignored");
            return TrackAction::Ignore;
        }
        let x = event.x.round() as i32;
        let y = event.y.round() as i32;

        if event.kind == PointerKind::Down {
            return self.on_down(event, x, y, ctx);
        }

        let Some(pointer) = self.pointer.as_mut() else {
            return TrackAction::Ignore;
        };
        if pointer.id != event.pointer_id {
            tracing::trace!(
                active = pointer.id,
                pointer_id = event.pointer_id,
                "event from unrecognized pointer ignored"
            );
            return TrackAction::Ignore;
        }

        match event.kind {
            PointerKind::Move => {
                self.velocity.add(event.timestamp, event.x);
                if pointer.captured {
                    let dx = x.saturating_sub(pointer.last_x);
                    pointer.last_x = x;
                    return TrackAction::Drag { dx };
                }
                let dx = x.saturating_sub(pointer.down_x);
                let dy = y.saturating_sub(pointer.down_y);
                let horizontal = dx.unsigned_abs() as f32;
                if pointer.on_content
                    && horizontal > self.touch_slop
                    && dx.unsigned_abs() > dy.unsigned_abs()
                {
                    pointer.captured = true;
                    pointer.last_x = x;
                    return TrackAction::Capture { dx };
                }
                pointer.last_x = x;
                TrackAction::Pass
            }
            PointerKind::Up => {
                self.velocity.add(event.timestamp, event.x);
                let captured = pointer.captured;
                let velocity = self.velocity.velocity();
                self.reset();
                if captured {
                    TrackAction::Release { velocity }
                } else {
                    TrackAction::Pass
                }
            }
            PointerKind::Cancel => {
                let captured = pointer.captured;
                self.reset();
                if captured {
                    TrackAction::Release { velocity: 0.0 }
                } else {
                    TrackAction::Pass
                }
            }
            PointerKind::Down => TrackAction::Ignore,
        }
    }

    fn on_down(&mut self, event: &PointerEvent, x: i32, y: i32, ctx: TrackContext) -> TrackAction {
        if let Some(active) = self.pointer
            && active.id != event.pointer_id
        {
            tracing::trace!(
                active = active.id,
                pointer_id = event.pointer_id,
                "second pointer ignored"
            );
            return TrackAction::Ignore;
        }

        let on_content = ctx.hits_content(event.x);
        let captured = ctx.settling && on_content;
        self.velocity.clear();
        self.velocity.add(event.timestamp, event.x);
        self.pointer = Some(Pointer {
            id: event.pointer_id,
            down_x: x,
            down_y: y,
            last_x: x,
            on_content,
            captured,
        });

        if captured {
            TrackAction::Capture { dx: 0 }
        } else {
            TrackAction::Pass
        }
    }

    /// Apply a drag delta to `previous`, clamping against the latest width.
    #[must_use]
    pub fn on_move(previous: i32, dx: i32, slide_width: i32, content_width: i32) -> MoveOutcome {
        let proposed = previous.saturating_add(dx);
        let offset = clamp::clamp(proposed, slide_width);
        let outcome = MoveOutcome {
            offset,
            applied_dx: offset - previous,
            percent: drag_percent(offset, content_width),
        };
        tracing::trace!(
            previous,
            dx,
            offset = outcome.offset,
            applied_dx = outcome.applied_dx,
            "drag move"
        );
        outcome
    }

    /// Pick the snap target for a gesture whose last move produced `last`.
    #[must_use]
    pub fn on_release(last: &MoveOutcome, velocity: f32, slide_width: i32) -> SnapTarget {
        let target = snap::decide(last.offset, velocity, slide_width);
        tracing::debug!(
            last_offset = last.offset,
            velocity,
            slide_width,
            ?target,
            "gesture released"
        );
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ctx() -> TrackContext {
        TrackContext {
            offset: 0,
            content_width: 300,
            settling: false,
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tracker() -> TouchGestureTracker {
        TouchGestureTracker::new(&SlideConfig::default())
    }

    #[test]
    fn only_content_is_capturable() {
        assert!(TouchGestureTracker::can_capture(PaneRole::Content));
        assert!(!TouchGestureTracker::can_capture(PaneRole::Slide));
    }

    #[test]
    fn tap_passes_through() {
        let mut tr = tracker();
        assert_eq!(tr.track(&PointerEvent::down(150.0, 10.0, ms(0)), ctx()), TrackAction::Pass);
        assert_eq!(tr.track(&PointerEvent::moved(153.0, 11.0, ms(10)), ctx()), TrackAction::Pass);
        assert_eq!(tr.track(&PointerEvent::up(153.0, 11.0, ms(20)), ctx()), TrackAction::Pass);
        assert!(!tr.is_tracking());
    }

    #[test]
    fn capture_after_slop_includes_full_delta() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        assert_eq!(tr.track(&PointerEvent::moved(195.0, 10.0, ms(10)), ctx()), TrackAction::Pass);
        assert_eq!(
            tr.track(&PointerEvent::moved(190.0, 10.0, ms(20)), ctx()),
            TrackAction::Capture { dx: -10 }
        );
        assert!(tr.is_captured());
        assert_eq!(
            tr.track(&PointerEvent::moved(180.0, 10.0, ms(30)), ctx()),
            TrackAction::Drag { dx: -10 }
        );
    }

    #[test]
    fn slop_exactly_met_does_not_capture() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        assert_eq!(tr.track(&PointerEvent::moved(192.0, 10.0, ms(10)), ctx()), TrackAction::Pass);
        assert!(matches!(
            tr.track(&PointerEvent::moved(191.0, 10.0, ms(20)), ctx()),
            TrackAction::Capture { dx: -9 }
        ));
    }

    #[test]
    fn vertical_motion_never_captures() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        assert_eq!(tr.track(&PointerEvent::moved(188.0, 40.0, ms(10)), ctx()), TrackAction::Pass);
        assert!(!tr.is_captured());
    }

    #[test]
    fn down_off_content_never_captures() {
        let mut tr = tracker();
        let open = TrackContext {
            offset: -100,
            content_width: 300,
            settling: false,
        };
        // Content spans [-100, 200); x=250 is over the revealed rear pane.
        tr.track(&PointerEvent::down(250.0, 10.0, ms(0)), open);
        assert_eq!(tr.track(&PointerEvent::moved(290.0, 10.0, ms(10)), open), TrackAction::Pass);
        assert!(!tr.is_captured());
    }

    #[test]
    fn down_during_settle_captures_immediately() {
        let mut tr = tracker();
        let settling = TrackContext {
            settling: true,
            ..ctx()
        };
        assert_eq!(
            tr.track(&PointerEvent::down(100.0, 10.0, ms(0)), settling),
            TrackAction::Capture { dx: 0 }
        );
        assert_eq!(
            tr.track(&PointerEvent::moved(98.0, 10.0, ms(5)), settling),
            TrackAction::Drag { dx: -2 }
        );
    }

    #[test]
    fn release_reports_velocity() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        tr.track(&PointerEvent::moved(180.0, 10.0, ms(10)), ctx());
        tr.track(&PointerEvent::moved(160.0, 10.0, ms(20)), ctx());
        let TrackAction::Release { velocity } = tr.track(&PointerEvent::up(150.0, 10.0, ms(30)), ctx())
        else {
            panic!("expected release");
        };
        // 50px left over 30ms
        assert!((velocity + 1666.7).abs() < 1.0, "velocity {velocity}");
        assert!(!tr.is_tracking());
    }

    #[test]
    fn cancel_releases_with_zero_velocity() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        tr.track(&PointerEvent::moved(150.0, 10.0, ms(10)), ctx());
        assert_eq!(
            tr.track(&PointerEvent::cancel(150.0, 10.0, ms(20)), ctx()),
            TrackAction::Release { velocity: 0.0 }
        );
    }

    #[test]
    fn active_pointer_follows_gesture() {
        let mut tr = tracker();
        assert_eq!(tr.active_pointer(), None);
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)).with_pointer(5), ctx());
        assert_eq!(tr.active_pointer(), Some(5));
        tr.track(&PointerEvent::up(200.0, 10.0, ms(5)).with_pointer(5), ctx());
        assert_eq!(tr.active_pointer(), None);
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(200.0, 10.0, ms(0)), ctx());
        tr.track(&PointerEvent::moved(180.0, 10.0, ms(10)), ctx());
        let other = PointerEvent::moved(20.0, 10.0, ms(15)).with_pointer(3);
        assert_eq!(tr.track(&other, ctx()), TrackAction::Ignore);
        let other_down = PointerEvent::down(20.0, 10.0, ms(16)).with_pointer(3);
        assert_eq!(tr.track(&other_down, ctx()), TrackAction::Ignore);
        let other_up = PointerEvent::up(20.0, 10.0, ms(17)).with_pointer(3);
        assert_eq!(tr.track(&other_up, ctx()), TrackAction::Ignore);
        assert!(tr.is_captured());
        assert_eq!(
            tr.track(&PointerEvent::moved(175.0, 10.0, ms(20)), ctx()),
            TrackAction::Drag { dx: -5 }
        );
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut tr = tracker();
        assert_eq!(tr.track(&PointerEvent::moved(10.0, 0.0, ms(0)), ctx()), TrackAction::Ignore);
        assert_eq!(tr.track(&PointerEvent::up(10.0, 0.0, ms(1)), ctx()), TrackAction::Ignore);
    }

    #[test]
    fn nan_coordinates_are_ignored() {
        let mut tr = tracker();
        assert_eq!(
            tr.track(&PointerEvent::down(f32::NAN, 0.0, ms(0)), ctx()),
            TrackAction::Ignore
        );
        assert!(!tr.is_tracking());
    }

    #[test]
    fn extreme_coordinates_saturate_deltas() {
        let mut tr = tracker();
        tr.track(&PointerEvent::down(-3.0e9, 10.0, ms(0)), ctx());
        // Down was off the content pane, so the huge delta only passes through.
        assert_eq!(tr.track(&PointerEvent::moved(3.0e9, 10.0, ms(10)), ctx()), TrackAction::Pass);

        let settling = TrackContext {
            settling: true,
            ..ctx()
        };
        let mut tr = tracker();
        tr.track(&PointerEvent::down(100.0, 10.0, ms(0)), settling);
        assert_eq!(
            tr.track(&PointerEvent::moved(-3.0e9, 10.0, ms(10)), settling),
            TrackAction::Drag { dx: i32::MIN }
        );
        assert_eq!(
            tr.track(&PointerEvent::moved(3.0e9, 10.0, ms(20)), settling),
            TrackAction::Drag { dx: i32::MAX }
        );
    }

    #[test]
    fn on_move_clamps_and_shrinks_delta() {
        let outcome = TouchGestureTracker::on_move(-90, -30, 100, 300);
        assert_eq!(outcome.offset, -100);
        assert_eq!(outcome.applied_dx, -10);
        assert!((outcome.percent - 1.0 / 3.0).abs() < 1e-6);

        let outcome = TouchGestureTracker::on_move(-5, 40, 100, 300);
        assert_eq!(outcome.offset, 0);
        assert_eq!(outcome.applied_dx, 5);
        assert_eq!(outcome.percent, 0.0);
    }

    #[test]
    fn on_move_uses_latest_width() {
        let outcome = TouchGestureTracker::on_move(-40, -40, 50, 300);
        assert_eq!(outcome.offset, -50);
        assert_eq!(outcome.applied_dx, -10);
    }

    #[test]
    fn drag_percent_without_width_is_zero() {
        assert_eq!(drag_percent(-10, 0), 0.0);
        assert_eq!(drag_percent(-600, 300), 1.0);
    }

    #[test]
    fn on_release_delegates_to_snap_policy() {
        let last = MoveOutcome::at_rest(-60, 300);
        assert_eq!(TouchGestureTracker::on_release(&last, 0.0, 100), SnapTarget::Open);
        assert_eq!(TouchGestureTracker::on_release(&last, 5.0, 100), SnapTarget::Closed);
    }
}
