// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: drag, snap and settle state machine for a two-pane slide panel.
//!
//! # Role
//! `slideview-core` is the interaction engine behind a panel whose front
//! ("content") pane can be dragged left to reveal a rear ("slide") pane. The
//! host supplies pointer events, layout widths and a frame loop; the core
//! moves the panes and reports open/close/drag notifications.
//!
//! # Primary responsibilities
//! - **clamp**: keep the content offset within `[-slide_width, 0]`.
//! - **snap**: choose open or closed at release from offset and velocity.
//! - **gesture**: slop-based interception, capture and drag tracking.
//! - **settle**: pluggable interpolation toward the snap target.
//! - **controller**: the public API tying it together.
//!
//! # Example
//!
//! ```
//! use slideview_core::{PanelHost, SlideConfig, SlideController};
//!
//! #[derive(Default)]
//! struct Host {
//!     positions: [i32; 2],
//! }
//!
//! impl PanelHost for Host {
//!     type Pane = usize;
//!     fn request_invalidate(&mut self) {}
//!     fn request_tick(&mut self) {}
//!     fn offset_pane(&mut self, pane: usize, dx: i32) {
//!         self.positions[pane] += dx;
//!     }
//! }
//!
//! let mut panel = SlideController::new([0, 1], Host::default(), SlideConfig::default())?;
//! panel.on_layout(300, 100);
//! panel.open();
//! while panel.tick() {}
//! assert!(panel.is_open());
//! assert_eq!(panel.host().positions, [-100, -100]);
//! # Ok::<(), slideview_core::SlideError>(())
//! ```

pub mod animation;
pub mod clamp;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod gesture;
pub mod host;
pub mod listener;
pub mod settle;
pub mod snap;
pub mod velocity;

pub use config::{SettleConfig, SlideConfig};
pub use controller::{DragPhase, PanelState, SlideController};
pub use error::{Result, SlideError};
pub use event::{PointerEvent, PointerKind};
pub use gesture::{MoveOutcome, TouchGestureTracker};
pub use host::{PaneRole, PanelHost};
pub use listener::{FnListener, SlideListener};
pub use settle::{EasedSettler, SettleStep, SettlingAnimator, SpringSettler};
pub use snap::SnapTarget;
