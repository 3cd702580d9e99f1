#![forbid(unsafe_code)]

//! Canonical interaction scenarios.
//!
//! Each [`Scenario`] builds a 300px content / 100px rear panel, performs a
//! scripted interaction and settles, producing a [`ScenarioReport`].
//!
//! | Scenario | Interaction | Expected |
//! |----------|-------------|----------|
//! | [`Scenario::DragPastHalf`] | drag left 60, hold, release | open |
//! | [`Scenario::DragShort`] | drag left 30, hold, release | closed |
//! | [`Scenario::FlickRightFromOpen`] | open, then flick right | closed |

use std::time::Duration;

use serde::Serialize;
use slideview_core::{PaneRole, Result, SlideConfig, SlideController, SnapTarget};

use crate::host::{RecordingHost, RecordingListener};
use crate::script::{GestureScript, play, run_until_idle};

pub const CONTENT_WIDTH: i32 = 300;
pub const SLIDE_WIDTH: i32 = 100;

/// Upper bound on settle ticks before a scenario is declared stuck.
const MAX_TICKS: usize = 1_000;

/// Built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    DragPastHalf,
    DragShort,
    FlickRightFromOpen,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::DragPastHalf,
        Scenario::DragShort,
        Scenario::FlickRightFromOpen,
    ];

    /// Stable name for logs and reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DragPastHalf => "drag_past_half",
            Self::DragShort => "drag_short",
            Self::FlickRightFromOpen => "flick_right_from_open",
        }
    }

    #[must_use]
    pub fn expected(self) -> SnapTarget {
        match self {
            Self::DragPastHalf => SnapTarget::Open,
            Self::DragShort | Self::FlickRightFromOpen => SnapTarget::Closed,
        }
    }

    /// Run the scenario against a fresh panel.
    pub fn run(self, config: &SlideConfig) -> Result<ScenarioReport> {
        let _span = tracing::info_span!("scenario", name = self.name()).entered();

        let listener = RecordingListener::new();
        let mut panel = SlideController::new(
            [PaneRole::Content, PaneRole::Slide],
            RecordingHost::new(),
            config.clone(),
        )?;
        panel.on_layout(CONTENT_WIDTH, SLIDE_WIDTH);
        panel.set_listener(listener.clone());

        let mut ticks = 0;
        let events = match self {
            Self::DragPastHalf => left_drag(60.0),
            Self::DragShort => left_drag(30.0),
            Self::FlickRightFromOpen => {
                panel.open();
                ticks += run_until_idle(&mut panel, MAX_TICKS);
                // Content spans [-100, 200); grab it at x=50 and fling right.
                GestureScript::at(50.0, 20.0)
                    .starting_at(Duration::from_secs(1))
                    .down()
                    .drag_by(40.0, 2, Duration::from_millis(20))
                    .up()
                    .build()
            }
        };

        let stats = play(&mut panel, &events);
        let released_at = panel.offset();
        let target = panel.settle_target();
        ticks += run_until_idle(&mut panel, MAX_TICKS);

        let report = ScenarioReport {
            scenario: self.name(),
            intercepted: stats.intercepted,
            released_at,
            target: target.map(target_name),
            is_open: panel.is_open(),
            offset: panel.offset(),
            slide_pane: panel.host().position(PaneRole::Slide),
            ticks,
            opens: listener.opens(),
            closes: listener.closes(),
            drag_notifications: listener.drags().len(),
        };
        tracing::info!(
            is_open = report.is_open,
            offset = report.offset,
            ticks = report.ticks,
            "scenario finished"
        );
        Ok(report)
    }
}

fn left_drag(distance: f32) -> Vec<slideview_core::PointerEvent> {
    GestureScript::at(200.0, 20.0)
        .down()
        .drag_by(-distance, 6, Duration::from_millis(120))
        // Hold still past the velocity window so the release is at rest.
        .hold(Duration::from_millis(200))
        .up()
        .build()
}

fn target_name(target: SnapTarget) -> &'static str {
    match target {
        SnapTarget::Open => "open",
        SnapTarget::Closed => "closed",
    }
}

/// What happened during a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub intercepted: bool,
    /// Content offset when the pointer was released.
    pub released_at: i32,
    /// Snap target chosen at release (absent if the release settled instantly).
    pub target: Option<&'static str>,
    pub is_open: bool,
    pub offset: i32,
    /// Accumulated displacement of the rear pane.
    pub slide_pane: i32,
    pub ticks: usize,
    pub opens: usize,
    pub closes: usize,
    pub drag_notifications: usize,
}

impl ScenarioReport {
    /// Whether the panel came to rest where the scenario expects.
    #[must_use]
    pub fn matches(&self, expected: SnapTarget) -> bool {
        self.is_open == expected.is_open() && self.offset == expected.offset(SLIDE_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Scenario::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Scenario::ALL.len());
    }

    #[test]
    fn report_serializes_as_flat_json() {
        let report = Scenario::DragShort.run(&SlideConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scenario"], "drag_short");
        assert_eq!(json["is_open"], false);
        assert_eq!(json["offset"], 0);
    }
}
