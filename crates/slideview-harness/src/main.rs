#![forbid(unsafe_code)]

//! `slideview-replay`: run the canonical scenarios and print one JSON line
//! per scenario. Set `RUST_LOG=slideview_core=debug` to see state changes.

use std::process::ExitCode;

use slideview_core::{SlideConfig, SlideError};
use slideview_harness::Scenario;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(%err, "replay failed");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool, SlideError> {
    let config = SlideConfig::default();
    let mut all_matched = true;
    for scenario in Scenario::ALL {
        let report = scenario.run(&config)?;
        let matched = report.matches(scenario.expected());
        if !matched {
            tracing::warn!(scenario = scenario.name(), expected = ?scenario.expected(), "unexpected resting state");
            all_matched = false;
        }
        match serde_json::to_string(&report) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::error!(%err, "report serialization failed"),
        }
    }
    Ok(all_matched)
}
