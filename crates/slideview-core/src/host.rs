#![forbid(unsafe_code)]

//! Host collaborator interface.
//!
//! The host owns rendering, layout and the frame loop. The controller drives
//! it through [`PanelHost`]: displacing panes, asking for a repaint, and
//! asking for the next `tick()`.

use std::fmt::Debug;

/// Which of the two children a pane handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneRole {
    /// The front pane the user drags.
    Content,
    /// The rear pane revealed when open.
    Slide,
}

/// Services the host provides to a slide controller.
pub trait PanelHost {
    /// Host-side handle for a child pane.
    type Pane: Copy + Eq + Debug;

    /// Schedule a repaint.
    fn request_invalidate(&mut self);

    /// Schedule a `tick()` before the next frame.
    fn request_tick(&mut self);

    /// Shift `pane` horizontally by `dx` pixels relative to where it is now.
    fn offset_pane(&mut self, pane: Self::Pane, dx: i32);
}

impl<H: PanelHost + ?Sized> PanelHost for &mut H {
    type Pane = H::Pane;

    fn request_invalidate(&mut self) {
        (**self).request_invalidate();
    }

    fn request_tick(&mut self) {
        (**self).request_tick();
    }

    fn offset_pane(&mut self, pane: Self::Pane, dx: i32) {
        (**self).offset_pane(pane, dx);
    }
}
