#![forbid(unsafe_code)]

//! Open/close/drag notifications for application code.

/// Receives high-level panel notifications. Every method defaults to a no-op.
pub trait SlideListener {
    /// A settle toward the open position completed.
    fn on_open(&mut self) {}

    /// A settle toward the closed position completed.
    fn on_close(&mut self) {}

    /// The content pane moved under the user's finger.
    ///
    /// `percent` is `|offset| / content_width`, in `[0.0, 1.0]`.
    fn on_drag(&mut self, _percent: f32) {}
}

/// Listener built from closures.
///
/// ```
/// use slideview_core::listener::{FnListener, SlideListener};
///
/// let mut opened = 0;
/// {
///     let mut listener = FnListener::new().with_open(|| opened += 1);
///     listener.on_open();
/// }
/// assert_eq!(opened, 1);
/// ```
#[derive(Default)]
pub struct FnListener<'a> {
    open: Option<Box<dyn FnMut() + 'a>>,
    close: Option<Box<dyn FnMut() + 'a>>,
    drag: Option<Box<dyn FnMut(f32) + 'a>>,
}

impl<'a> FnListener<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_open(mut self, f: impl FnMut() + 'a) -> Self {
        self.open = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_close(mut self, f: impl FnMut() + 'a) -> Self {
        self.close = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_drag(mut self, f: impl FnMut(f32) + 'a) -> Self {
        self.drag = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for FnListener<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnListener")
            .field("open", &self.open.is_some())
            .field("close", &self.close.is_some())
            .field("drag", &self.drag.is_some())
            .finish()
    }
}

impl SlideListener for FnListener<'_> {
    fn on_open(&mut self) {
        if let Some(f) = self.open.as_mut() {
            f();
        }
    }

    fn on_close(&mut self) {
        if let Some(f) = self.close.as_mut() {
            f();
        }
    }

    fn on_drag(&mut self, percent: f32) {
        if let Some(f) = self.drag.as_mut() {
            f(percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;
    impl SlideListener for Silent {}

    #[test]
    fn default_methods_are_noops() {
        let mut listener = Silent;
        listener.on_open();
        listener.on_close();
        listener.on_drag(0.5);
    }

    #[test]
    fn fn_listener_routes_each_callback() {
        let mut log = Vec::new();
        {
            let log = std::cell::RefCell::new(&mut log);
            let mut listener = FnListener::new()
                .with_open(|| log.borrow_mut().push("open".to_string()))
                .with_close(|| log.borrow_mut().push("close".to_string()))
                .with_drag(|p| log.borrow_mut().push(format!("drag {p}")));
            listener.on_drag(0.25);
            listener.on_open();
            listener.on_close();
        }
        assert_eq!(log, vec!["drag 0.25", "open", "close"]);
    }

    #[test]
    fn missing_callbacks_are_skipped() {
        let mut listener = FnListener::new();
        listener.on_open();
        listener.on_drag(1.0);
        assert!(format!("{listener:?}").contains("open: false"));
    }
}
