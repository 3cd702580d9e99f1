#![forbid(unsafe_code)]

//! Recording host and listener.
//!
//! [`RecordingHost`] implements [`PanelHost`] without any rendering: it
//! counts repaint and tick requests and keeps each pane's accumulated
//! displacement so tests can assert what the panel asked for.

use std::cell::RefCell;
use std::rc::Rc;

use slideview_core::{PaneRole, PanelHost, SlideListener};

/// One `offset_pane` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displacement {
    pub pane: PaneRole,
    pub dx: i32,
}

/// Host that records every request made by a controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub invalidations: usize,
    pub tick_requests: usize,
    content_left: i32,
    slide_left: i32,
    log: Vec<Displacement>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated displacement of `pane`.
    #[must_use]
    pub fn position(&self, pane: PaneRole) -> i32 {
        match pane {
            PaneRole::Content => self.content_left,
            PaneRole::Slide => self.slide_left,
        }
    }

    /// Every displacement request, in order.
    #[must_use]
    pub fn displacements(&self) -> &[Displacement] {
        &self.log
    }

    /// Reset counters and the displacement log, keeping positions.
    pub fn clear_log(&mut self) {
        self.invalidations = 0;
        self.tick_requests = 0;
        self.log.clear();
    }
}

impl PanelHost for RecordingHost {
    type Pane = PaneRole;

    fn request_invalidate(&mut self) {
        self.invalidations += 1;
    }

    fn request_tick(&mut self) {
        self.tick_requests += 1;
    }

    fn offset_pane(&mut self, pane: PaneRole, dx: i32) {
        match pane {
            PaneRole::Content => self.content_left += dx,
            PaneRole::Slide => self.slide_left += dx,
        }
        self.log.push(Displacement { pane, dx });
    }
}

/// A listener notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListenerCall {
    Open,
    Close,
    Drag(f32),
}

/// Listener that appends to a shared log. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    calls: Rc<RefCell<Vec<ListenerCall>>>,
}

impl RecordingListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ListenerCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn opens(&self) -> usize {
        self.count(|c| matches!(c, ListenerCall::Open))
    }

    #[must_use]
    pub fn closes(&self) -> usize {
        self.count(|c| matches!(c, ListenerCall::Close))
    }

    #[must_use]
    pub fn drags(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ListenerCall::Drag(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ListenerCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }
}

impl SlideListener for RecordingListener {
    fn on_open(&mut self) {
        self.calls.borrow_mut().push(ListenerCall::Open);
    }

    fn on_close(&mut self) {
        self.calls.borrow_mut().push(ListenerCall::Close);
    }

    fn on_drag(&mut self, percent: f32) {
        self.calls.borrow_mut().push(ListenerCall::Drag(percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_accumulates_per_pane() {
        let mut host = RecordingHost::new();
        host.offset_pane(PaneRole::Content, -10);
        host.offset_pane(PaneRole::Slide, -10);
        host.offset_pane(PaneRole::Content, 4);
        assert_eq!(host.position(PaneRole::Content), -6);
        assert_eq!(host.position(PaneRole::Slide), -10);
        assert_eq!(host.displacements().len(), 3);
        host.clear_log();
        assert!(host.displacements().is_empty());
        assert_eq!(host.position(PaneRole::Content), -6);
    }

    #[test]
    fn listener_clones_share_log() {
        let listener = RecordingListener::new();
        let mut handle = listener.clone();
        handle.on_drag(0.5);
        handle.on_open();
        handle.on_close();
        assert_eq!(listener.opens(), 1);
        assert_eq!(listener.closes(), 1);
        assert_eq!(listener.drags(), vec![0.5]);
    }
}
