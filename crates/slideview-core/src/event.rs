#![forbid(unsafe_code)]

//! Pointer input types consumed by the gesture tracker.
//!
//! The host translates whatever its windowing layer produces into
//! [`PointerEvent`] values. All events derive `Clone` and `PartialEq` for use
//! in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are in the panel's own pixel space (`x` grows rightward).
//! - `timestamp` is a monotonic offset from an arbitrary host epoch; only
//!   differences between timestamps are meaningful.
//! - A single pointer is tracked at a time; other pointer ids are ignored
//!   while a gesture is active.

use std::time::Duration;

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// Gesture aborted by the host (focus loss, parent stole the stream).
    Cancel,
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The event phase.
    pub kind: PointerKind,
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
    /// Monotonic event time.
    pub timestamp: Duration,
    /// Identifier of the pointer that produced the event.
    pub pointer_id: u32,
}

impl PointerEvent {
    /// Create an event for pointer `0`.
    #[must_use]
    pub const fn new(kind: PointerKind, x: f32, y: f32, timestamp: Duration) -> Self {
        Self {
            kind,
            x,
            y,
            timestamp,
            pointer_id: 0,
        }
    }

    #[must_use]
    pub const fn down(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Down, x, y, timestamp)
    }

    #[must_use]
    pub const fn moved(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Move, x, y, timestamp)
    }

    #[must_use]
    pub const fn up(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Up, x, y, timestamp)
    }

    #[must_use]
    pub const fn cancel(x: f32, y: f32, timestamp: Duration) -> Self {
        Self::new(PointerKind::Cancel, x, y, timestamp)
    }

    /// Set the pointer id (builder pattern).
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Whether this event ends a gesture.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerKind::Up | PointerKind::Cancel)
    }
}
