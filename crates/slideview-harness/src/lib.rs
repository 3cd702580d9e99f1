#![forbid(unsafe_code)]

//! Test harness for `slideview-core`.
//!
//! - [`RecordingHost`]: a [`PanelHost`](slideview_core::PanelHost) that
//!   records repaint/tick requests and pane displacements.
//! - [`RecordingListener`]: a listener with a shared call log.
//! - [`GestureScript`] / [`play`]: scripted pointer input routed the way a
//!   host would route it.
//! - [`Scenario`]: canonical interactions with serializable reports.

pub mod host;
pub mod scenario;
pub mod script;

pub use host::{Displacement, ListenerCall, RecordingHost, RecordingListener};
pub use scenario::{Scenario, ScenarioReport};
pub use script::{GestureScript, PlayStats, play, run_until_idle};
