#![forbid(unsafe_code)]

//! The slide panel controller.
//!
//! [`SlideController`] owns the panel state, the gesture tracker and a
//! settling strategy, and exposes the operations the host and application
//! call: `open`, `close`, `is_open`, listener registration, layout updates,
//! pointer input and the per-frame `tick`.
//!
//! # State Machine
//!
//! ```text
//!   Idle ──capture──▶ Dragging ──release/cancel──▶ Settling ──done──▶ Idle
//!    │                   ▲                            │  ▲
//!    └──open()/close()───┼────────────────────────────┘  │
//!                        └──────capture (settle dropped)─┘
//! ```
//!
//! # Invariants
//!
//! 1. Once layout is known, `offset ∈ [-slide_width, 0]`.
//! 2. Every offset change displaces both panes by the same `dx`.
//! 3. `is_open()` flips only when a settle completes.
//! 4. A settle discarded by a new capture fires no listener callback.
//! 5. `tick()` does nothing unless a settle is in flight.
//!
//! # Input routing
//!
//! The host calls [`should_intercept`](SlideController::should_intercept)
//! for each event before children see it, until it returns `true`; after
//! that it sends the rest of the gesture to
//! [`process_event`](SlideController::process_event). Either entry point may
//! also be used alone. Each event must be delivered through only one of them.

use std::time::Duration;

use crate::clamp;
use crate::config::SlideConfig;
use crate::error::{Result, SlideError};
use crate::event::{PointerEvent, PointerKind};
use crate::gesture::{MoveOutcome, TouchGestureTracker, TrackAction, TrackContext};
use crate::host::{PaneRole, PanelHost};
use crate::listener::SlideListener;
use crate::settle::{EasedSettler, SettleStep, SettlingAnimator};
use crate::snap::SnapTarget;

/// Interaction phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

/// Observable panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    pub offset: i32,
    pub phase: DragPhase,
    pub is_open: bool,
    pub content_width: i32,
    pub slide_width: i32,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    last: MoveOutcome,
}

#[derive(Debug, Clone, Copy)]
struct PendingSettle {
    target: SnapTarget,
    /// Listener callbacks owed when this settle completes.
    notifications: u32,
}

/// Orchestrates gesture tracking and settling for a two-pane slide panel.
pub struct SlideController<H: PanelHost, A: SettlingAnimator = EasedSettler> {
    host: H,
    content: H::Pane,
    slide: H::Pane,
    state: PanelState,
    config: SlideConfig,
    tracker: TouchGestureTracker,
    animator: A,
    drag: Option<DragSession>,
    settle: Option<PendingSettle>,
    listener: Option<Box<dyn SlideListener>>,
}

impl<H: PanelHost, A: SettlingAnimator> std::fmt::Debug for SlideController<H, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideController")
            .field("content", &self.content)
            .field("slide", &self.slide)
            .field("state", &self.state)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<H: PanelHost> SlideController<H> {
    /// Build a controller over the host's child panes.
    ///
    /// `children` are in layout order: the content pane first, the rear pane
    /// second. Extra children are ignored.
    ///
    /// # Errors
    ///
    /// [`SlideError::Configuration`] when fewer than two panes are given, or
    /// [`SlideError::InvalidConfig`] when `config` fails validation.
    pub fn new(
        children: impl IntoIterator<Item = H::Pane>,
        host: H,
        config: SlideConfig,
    ) -> Result<Self> {
        let animator = EasedSettler::from_config(&config.settle);
        Self::with_animator(children, host, config, animator)
    }
}

impl<H: PanelHost, A: SettlingAnimator> SlideController<H, A> {
    /// Build a controller with a custom settling strategy.
    ///
    /// # Errors
    ///
    /// Same as [`SlideController::new`].
    pub fn with_animator(
        children: impl IntoIterator<Item = H::Pane>,
        host: H,
        config: SlideConfig,
        animator: A,
    ) -> Result<Self> {
        config.validate()?;

        let children: Vec<H::Pane> = children.into_iter().collect();
        let (content, slide) = match children.as_slice() {
            [content, slide, rest @ ..] => {
                if !rest.is_empty() {
                    tracing::debug!(extra = rest.len(), "ignoring panes beyond content and slide");
                }
                (*content, *slide)
            }
            _ => {
                tracing::warn!(found = children.len(), "slide panel needs two panes");
                return Err(SlideError::missing_panes(children.len()));
            }
        };

        Ok(Self {
            host,
            content,
            slide,
            state: PanelState::default(),
            tracker: TouchGestureTracker::new(&config),
            config,
            animator,
            drag: None,
            settle: None,
            listener: None,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.state.offset
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.state.phase
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn content_width(&self) -> i32 {
        self.state.content_width
    }

    #[inline]
    #[must_use]
    pub fn slide_width(&self) -> i32 {
        self.state.slide_width
    }

    /// How far the rear pane is revealed, in `[0.0, 1.0]`.
    #[must_use]
    pub fn open_fraction(&self) -> f32 {
        if self.state.slide_width <= 0 {
            return if self.state.is_open { 1.0 } else { 0.0 };
        }
        (self.state.offset.unsigned_abs() as f32 / self.state.slide_width as f32).clamp(0.0, 1.0)
    }

    /// Target of the settle in flight, if any.
    #[must_use]
    pub fn settle_target(&self) -> Option<SnapTarget> {
        self.settle.map(|s| s.target)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[inline]
    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    // -----------------------------------------------------------------------
    // Listener
    // -----------------------------------------------------------------------

    /// Register `listener`, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl SlideListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the registered listener, returning it.
    pub fn clear_listener(&mut self) -> Option<Box<dyn SlideListener>> {
        self.listener.take()
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Record fresh measurements from the host's layout pass.
    pub fn on_layout(&mut self, content_width: i32, slide_width: i32) {
        let content_width = content_width.max(0);
        let slide_width = slide_width.max(0);
        if content_width == self.state.content_width && slide_width == self.state.slide_width {
            return;
        }
        tracing::debug!(content_width, slide_width, "layout updated");
        self.state.content_width = content_width;
        self.state.slide_width = slide_width;

        match self.state.phase {
            DragPhase::Idle => {
                let rest = if self.state.is_open { -slide_width } else { 0 };
                self.apply_offset(rest);
            }
            DragPhase::Dragging => {
                let clamped = clamp::clamp(self.state.offset, slide_width);
                self.apply_offset(clamped);
                if let Some(session) = self.drag.as_mut() {
                    session.last = MoveOutcome::at_rest(clamped, content_width);
                }
            }
            DragPhase::Settling => {
                let clamped = clamp::clamp(self.state.offset, slide_width);
                self.apply_offset(clamped);
                if let Some(pending) = self.settle {
                    let to = pending.target.offset(slide_width);
                    self.animator.start(clamped, to, clamp::drag_range(content_width));
                }
            }
        }
        self.host.request_invalidate();
    }

    // -----------------------------------------------------------------------
    // Programmatic open/close
    // -----------------------------------------------------------------------

    /// Settle to the open position; `on_open` fires when the settle lands.
    pub fn open(&mut self) {
        self.settle_to(SnapTarget::Open);
    }

    /// Settle to the closed position; `on_close` fires when the settle lands.
    pub fn close(&mut self) {
        self.settle_to(SnapTarget::Closed);
    }

    /// Close if open, open otherwise.
    pub fn toggle(&mut self) {
        if self.state.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    fn settle_to(&mut self, target: SnapTarget) {
        if self.drag.take().is_some() {
            tracing::debug!("drag abandoned for programmatic settle");
            self.tracker.reset();
        }

        let pending = match self.settle {
            Some(pending) if pending.target == target => PendingSettle {
                target,
                notifications: pending.notifications.saturating_add(1),
            },
            Some(pending) => {
                tracing::debug!(from = ?pending.target, to = ?target, "settle redirected");
                PendingSettle {
                    target,
                    notifications: 1,
                }
            }
            None => PendingSettle {
                target,
                notifications: 1,
            },
        };
        self.settle = Some(pending);

        let to = target.offset(self.state.slide_width);
        if self.state.offset == to {
            self.animator.cancel();
            self.finish_settle();
            return;
        }

        tracing::debug!(from = self.state.offset, to, ?target, "settle started");
        self.animator.start(
            self.state.offset,
            to,
            clamp::drag_range(self.state.content_width),
        );
        self.state.phase = DragPhase::Settling;
        self.host.request_invalidate();
        self.host.request_tick();
    }

    fn finish_settle(&mut self) {
        let Some(pending) = self.settle.take() else {
            self.state.phase = DragPhase::Idle;
            return;
        };
        let to = pending.target.offset(self.state.slide_width);
        self.apply_offset(to);
        self.state.phase = DragPhase::Idle;
        self.state.is_open = pending.target.is_open();
        self.host.request_invalidate();
        tracing::debug!(
            target = ?pending.target,
            offset = to,
            notifications = pending.notifications,
            "settle complete"
        );

        if let Some(listener) = self.listener.as_mut() {
            for _ in 0..pending.notifications {
                match pending.target {
                    SnapTarget::Open => listener.on_open(),
                    SnapTarget::Closed => listener.on_close(),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    /// Advance the settle by one frame interval.
    ///
    /// Returns `true` while more ticks are needed.
    pub fn tick(&mut self) -> bool {
        self.tick_by(self.config.frame_interval)
    }

    /// Advance the settle by `dt`. Returns `true` while more ticks are needed.
    pub fn tick_by(&mut self, dt: Duration) -> bool {
        if self.state.phase != DragPhase::Settling {
            return false;
        }
        match self.animator.step(dt) {
            SettleStep::Moving(offset) => {
                let offset = clamp::clamp(offset, self.state.slide_width);
                self.apply_offset(offset);
                self.host.request_invalidate();
                self.host.request_tick();
                true
            }
            SettleStep::Settled(_) | SettleStep::Idle => {
                self.finish_settle();
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Whether the panel takes this gesture away from its children.
    pub fn should_intercept(&mut self, event: &PointerEvent) -> bool {
        self.handle_event(event);
        self.tracker.is_captured() || self.state.phase == DragPhase::Dragging
    }

    /// Handle an event routed to the panel itself.
    ///
    /// Returns `true` if the event belonged to the tracked pointer.
    pub fn process_event(&mut self, event: &PointerEvent) -> bool {
        !matches!(self.handle_event(event), TrackAction::Ignore)
    }

    /// Whether `pane` may be captured for dragging.
    #[must_use]
    pub fn try_capture(&self, pane: H::Pane) -> bool {
        self.role_of(pane)
            .is_some_and(TouchGestureTracker::can_capture)
    }

    /// Which child `pane` is, if it is one of ours.
    #[must_use]
    pub fn role_of(&self, pane: H::Pane) -> Option<PaneRole> {
        if pane == self.content {
            Some(PaneRole::Content)
        } else if pane == self.slide {
            Some(PaneRole::Slide)
        } else {
            None
        }
    }

    fn handle_event(&mut self, event: &PointerEvent) -> TrackAction {
        if event.kind == PointerKind::Down
            && self.drag.is_some()
            && self
                .tracker
                .active_pointer()
                .is_none_or(|id| id == event.pointer_id)
        {
            // The previous gesture never ended; settle it before re-arming.
            tracing::debug!(
                pointer_id = event.pointer_id,
                offset = self.state.offset,
                "stale drag released by new down"
            );
            self.tracker.reset();
            self.release(0.0);
        }

        let ctx = TrackContext {
            offset: self.state.offset,
            content_width: self.state.content_width,
            settling: self.state.phase == DragPhase::Settling,
        };
        let action = self.tracker.track(event, ctx);
        match action {
            TrackAction::Pass | TrackAction::Ignore => {}
            TrackAction::Capture { dx } => {
                self.begin_drag();
                if dx != 0 {
                    self.drag_by(dx);
                }
            }
            TrackAction::Drag { dx } => {
                self.drag_by(dx);
            }
            TrackAction::Release { velocity } => {
                self.release(velocity);
            }
        }
        action
    }

    fn begin_drag(&mut self) {
        if self.state.phase == DragPhase::Settling {
            tracing::debug!(
                offset = self.state.offset,
                target = ?self.settle.map(|s| s.target),
                "settle cancelled by capture"
            );
            self.animator.cancel();
            self.settle = None;
        }
        tracing::debug!(offset = self.state.offset, "drag captured");
        self.state.phase = DragPhase::Dragging;
        self.drag = Some(DragSession {
            last: MoveOutcome::at_rest(self.state.offset, self.state.content_width),
        });
    }

    /// Drag the content pane by `dx`, returning what was applied.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_by(&mut self, dx: i32) -> Option<MoveOutcome> {
        if self.state.phase != DragPhase::Dragging {
            return None;
        }
        let outcome = TouchGestureTracker::on_move(
            self.state.offset,
            dx,
            self.state.slide_width,
            self.state.content_width,
        );
        let applied = self.apply_offset(outcome.offset);
        debug_assert_eq!(applied, outcome.applied_dx);
        if let Some(session) = self.drag.as_mut() {
            session.last = outcome;
        }
        if outcome.applied_dx != 0
            && let Some(listener) = self.listener.as_mut()
        {
            listener.on_drag(outcome.percent);
        }
        self.host.request_invalidate();
        Some(outcome)
    }

    /// Start a drag without pointer input, as if the content pane were
    /// captured. Cancels any settle in flight.
    pub fn begin_manual_drag(&mut self) {
        self.tracker.reset();
        self.begin_drag();
    }

    /// End the active drag with `velocity` and settle to the chosen target.
    ///
    /// Returns the target, or `None` when no drag was active.
    pub fn release(&mut self, velocity: f32) -> Option<SnapTarget> {
        let session = self.drag.take()?;
        let target =
            TouchGestureTracker::on_release(&session.last, velocity, self.state.slide_width);
        self.settle_to(target);
        Some(target)
    }

    /// Move both panes so the content pane sits at `offset`.
    ///
    /// Returns the displacement applied.
    fn apply_offset(&mut self, offset: i32) -> i32 {
        let dx = offset - self.state.offset;
        if dx != 0 {
            self.host.offset_pane(self.content, dx);
            self.host.offset_pane(self.slide, dx);
            self.state.offset = offset;
        }
        dx
    }
}
