#![forbid(unsafe_code)]

//! Scripted pointer gestures.
//!
//! [`GestureScript`] builds a timestamped [`PointerEvent`] sequence from a
//! few high-level steps, and [`play`] routes it into a controller the way a
//! host would: through `should_intercept` until the panel claims the
//! gesture, then through `process_event`.
//!
//! ```
//! use std::time::Duration;
//! use slideview_harness::GestureScript;
//!
//! let events = GestureScript::at(200.0, 20.0)
//!     .down()
//!     .drag_by(-60.0, 6, Duration::from_millis(120))
//!     .hold(Duration::from_millis(200))
//!     .up()
//!     .build();
//! assert_eq!(events.len(), 8);
//! ```

use std::time::Duration;

use slideview_core::{PanelHost, PointerEvent, SettlingAnimator, SlideController};

/// Builder for a single-pointer gesture.
#[derive(Debug, Clone)]
pub struct GestureScript {
    x: f32,
    y: f32,
    now: Duration,
    pointer_id: u32,
    events: Vec<PointerEvent>,
}

impl GestureScript {
    /// Start a script with the pointer at `(x, y)` and time zero.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            now: Duration::ZERO,
            pointer_id: 0,
            events: Vec::new(),
        }
    }

    /// Use `pointer_id` for subsequent events.
    #[must_use]
    pub fn pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Shift the script's clock start.
    #[must_use]
    pub fn starting_at(mut self, now: Duration) -> Self {
        self.now = now;
        self
    }

    fn push(&mut self, event: PointerEvent) {
        self.events.push(event.with_pointer(self.pointer_id));
    }

    #[must_use]
    pub fn down(mut self) -> Self {
        self.push(PointerEvent::down(self.x, self.y, self.now));
        self
    }

    /// Move horizontally by `dx` in `steps` equal moves spread over `over`.
    #[must_use]
    pub fn drag_by(self, dx: f32, steps: u32, over: Duration) -> Self {
        self.drag_xy(dx, 0.0, steps, over)
    }

    /// Move by `(dx, dy)` in `steps` equal moves spread over `over`.
    #[must_use]
    pub fn drag_xy(mut self, dx: f32, dy: f32, steps: u32, over: Duration) -> Self {
        let steps = steps.max(1);
        let (start_x, start_y) = (self.x, self.y);
        let start_time = self.now;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.x = start_x + dx * t;
            self.y = start_y + dy * t;
            self.now = start_time + over * i / steps;
            self.push(PointerEvent::moved(self.x, self.y, self.now));
        }
        self
    }

    /// Advance the clock without events.
    #[must_use]
    pub fn hold(mut self, duration: Duration) -> Self {
        self.now += duration;
        self
    }

    #[must_use]
    pub fn up(mut self) -> Self {
        self.push(PointerEvent::up(self.x, self.y, self.now));
        self
    }

    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.push(PointerEvent::cancel(self.x, self.y, self.now));
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<PointerEvent> {
        self.events
    }
}

/// Outcome of routing a gesture into a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayStats {
    /// Events the panel saw through `should_intercept`.
    pub offered: usize,
    /// Events delivered through `process_event` after interception.
    pub processed: usize,
    /// Whether the panel claimed the gesture.
    pub intercepted: bool,
}

/// Feed one gesture's `events` to `controller`, intercepting the way a host
/// would.
pub fn play<H: PanelHost, A: SettlingAnimator>(
    controller: &mut SlideController<H, A>,
    events: &[PointerEvent],
) -> PlayStats {
    let mut stats = PlayStats::default();
    for event in events {
        if stats.intercepted {
            controller.process_event(event);
            stats.processed += 1;
        } else {
            stats.offered += 1;
            if controller.should_intercept(event) {
                stats.intercepted = true;
            }
        }
    }
    stats
}

/// Tick `controller` until it is idle. Returns the number of ticks that
/// produced movement.
pub fn run_until_idle<H: PanelHost, A: SettlingAnimator>(
    controller: &mut SlideController<H, A>,
    max_ticks: usize,
) -> usize {
    let mut ticks = 0;
    while ticks < max_ticks && controller.tick() {
        ticks += 1;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use slideview_core::PointerKind;

    #[test]
    fn drag_steps_are_evenly_spaced() {
        let events = GestureScript::at(100.0, 0.0)
            .down()
            .drag_by(-40.0, 4, Duration::from_millis(40))
            .up()
            .build();
        let xs: Vec<f32> = events.iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![100.0, 90.0, 80.0, 70.0, 60.0, 60.0]);
        let times: Vec<u128> = events.iter().map(|e| e.timestamp.as_millis()).collect();
        assert_eq!(times, vec![0, 10, 20, 30, 40, 40]);
        assert_eq!(events.last().map(|e| e.kind), Some(PointerKind::Up));
    }

    #[test]
    fn hold_advances_clock_only() {
        let events = GestureScript::at(0.0, 0.0)
            .down()
            .hold(Duration::from_millis(250))
            .cancel()
            .build();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].timestamp, Duration::from_millis(250));
        assert_eq!(events[1].kind, PointerKind::Cancel);
    }

    #[test]
    fn pointer_id_applies_to_events() {
        let events = GestureScript::at(0.0, 0.0).pointer(4).down().up().build();
        assert!(events.iter().all(|e| e.pointer_id == 4));
    }
}
